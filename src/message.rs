use crate::model::LoadedImage;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    PickFile,
    FileChosen(Option<PathBuf>),
    FileLoaded(u64, Result<LoadedImage, String>),
    WindowCenterChanged(f64),
    WindowWidthChanged(f64),
    ResetWindow,
}
