//! Watch engine: page retrieval, state persistence, announcements and the
//! check cycle that ties them together.
mod checker;
mod decode;
mod discord;
mod fetch;
mod notify;
mod persist;
mod store;
mod types;

pub use checker::{CheckError, Checker, CycleOutcome, CycleReport, NotifyFailure};
pub use decode::{decode_html, DecodedHtml};
pub use discord::{DiscordNotifier, DiscordSettings, DEFAULT_API_BASE};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use notify::{CrossPostOutcome, Delivery, Notifier, NotifyError};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use store::{ListStore, StoreError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchedPage};
