/// Data model -- the small value types shared by every layer.

pub mod device;
pub mod mode;
pub mod notice;
pub mod payload;
pub mod result;

pub use device::{select_preferred, CameraDevice, CaptureTarget, Facing};
pub use mode::ScanMode;
pub use notice::{Notice, NoticeLevel};
pub use payload::{InputPayload, PayloadSource};
pub use result::{ResultAction, ResultKind, ScanResult};
