mod up;

pub use up::UPSafeCell;
