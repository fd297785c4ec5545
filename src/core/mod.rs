pub mod entity;
pub mod map;
pub mod query;
pub mod search;
pub mod suggestions;

pub use entity::{EntityInfoController, InfoSheet};
pub use map::{MapController, MapMarker};
pub use query::{QueryConsole, ResultsPager, SampleQueries};
pub use search::SearchController;
pub use suggestions::{Debouncer, SuggestionController, SuggestionCursor};
