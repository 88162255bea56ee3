//! Streaming fragment contracts and in-memory stream utilities.
//!
//! ```rust
//! use vprovider::{FragmentStream, VecFragmentStream};
//!
//! let stream = VecFragmentStream::new(vec![Ok("hello".to_string())]);
//! let _boxed: FragmentStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::ProviderError;

/// Provider fragment stream contract.
///
/// Invariants for consumers:
/// - Fragments are emitted in arrival order and are never empty.
/// - An `Err` item is terminal; nothing follows it.
/// - Once the stream yields `None`, it must not yield additional items.
pub trait TextFragmentStream: Stream<Item = Result<String, ProviderError>> + Send {}

impl<T> TextFragmentStream for T where T: Stream<Item = Result<String, ProviderError>> + Send {}

pub type FragmentStream<'a> = Pin<Box<dyn TextFragmentStream + 'a>>;

#[derive(Debug)]
pub struct VecFragmentStream {
    fragments: VecDeque<Result<String, ProviderError>>,
}

impl VecFragmentStream {
    pub fn new(fragments: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            fragments: fragments.into(),
        }
    }
}

impl Stream for VecFragmentStream {
    type Item = Result<String, ProviderError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<String, ProviderError>>> {
        Poll::Ready(self.fragments.pop_front())
    }
}
