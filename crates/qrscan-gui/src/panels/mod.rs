/// UI panels for QrScan.

pub mod camera_panel;
pub mod file_panel;
pub mod mode_panel;
pub mod result_panel;
