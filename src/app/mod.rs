// Application layer - Use case interactors

pub mod clip_interactor;
pub mod container;
pub mod download_interactor;

// Re-export interactors
pub use clip_interactor::{ClipInteractor, LocalClipRequest, UrlClipRequest};
pub use container::{AppContainer, DefaultAppContainer};
pub use download_interactor::{DownloadInteractor, DownloadRequest};
