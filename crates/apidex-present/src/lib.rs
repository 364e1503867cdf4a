//! Result presentation for apidex.
//!
//! The presenter sits between a host's search box and the index: it debounces input,
//! runs searches, renders the ranked groups through a [`ResultView`], and turns a selected
//! item into a [`Navigator`] call. Presentation is kept out of the index; the same results
//! can be drawn to a terminal, a JSON response, or an [`html`] fragment.
//!
//! ```
//! use std::time::Instant;
//!
//! use apidex_index::{Declaration, SymbolKind, build};
//! use apidex_present::{
//!     IndexHandle, Presentation, Presenter, PresenterOptions, RecordingNavigator,
//!     html::HtmlView,
//! };
//!
//! let index = build([Declaration::new(
//!     "pcpp::Packet::getFirstLayer",
//!     SymbolKind::Member,
//!     "() const",
//!     "classpcpp_1_1_packet.html",
//!     "a4e",
//! )])
//! .unwrap();
//!
//! let mut presenter = Presenter::new(
//!     HtmlView::new(None),
//!     RecordingNavigator::default(),
//!     IndexHandle::ready(index),
//!     PresenterOptions::default(),
//! );
//! assert_eq!(presenter.submit_now("layer", Instant::now()), Presentation::Rendered(1));
//! assert!(presenter.view().to_html().contains("classpcpp_1_1_packet.html#a4e"));
//!
//! let location = presenter.select(0, 0).unwrap();
//! assert_eq!(location.to_string(), "classpcpp_1_1_packet.html#a4e");
//! ```

#![warn(missing_docs)]

mod debounce;
mod error;
mod groups;
mod handle;
pub mod html;
mod presenter;
mod view;

pub use debounce::{Debouncer, RequestId, SearchRequest};
pub use error::SelectError;
pub use groups::{ResultGroup, ResultItem, collect_groups};
pub use handle::IndexHandle;
pub use presenter::{InputEvent, Presentation, Presenter, PresenterOptions};
pub use view::{Navigator, RecordingNavigator, ResultView};
