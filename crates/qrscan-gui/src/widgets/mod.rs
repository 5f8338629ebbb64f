/// UI widgets for QrScan.

pub mod notices;
pub mod status_bar;
pub mod toolbar;
