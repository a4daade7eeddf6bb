mod map_board;
mod quiz_vm;
mod scheduler;

pub use map_board::{BoardView, FocusedPlace, MapBoard, RegionTile};
pub use quiz_vm::QuizVm;
pub use scheduler::DioxusScheduler;
