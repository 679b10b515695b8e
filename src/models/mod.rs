pub mod contact;
pub mod enums;
pub mod meal;
pub mod vital_reading;

pub use contact::*;
pub use enums::*;
pub use meal::*;
pub use vital_reading::*;
