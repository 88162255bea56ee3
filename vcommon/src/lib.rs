//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use vcommon::{GenerationOptions, TurnId};
//!
//! let id = TurnId::from("turn-1");
//! let options = GenerationOptions::default().with_temperature(0.3).enable_streaming();
//!
//! assert_eq!(id.as_str(), "turn-1");
//! assert_eq!(options.max_tokens, 1024);
//! assert!(options.stream);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use vcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod id {
    //! Opaque identifier newtypes.
    //!
    //! ```rust
    //! use vcommon::TurnId;
    //!
    //! let generated = TurnId::generate();
    //! let fixed = TurnId::new("turn-42");
    //!
    //! assert_ne!(generated, fixed);
    //! assert_eq!(fixed.to_string(), "turn-42");
    //! ```

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct TurnId(String);

    impl TurnId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn generate() -> Self {
            Self(uuid::Uuid::new_v4().to_string())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for TurnId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for TurnId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for TurnId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Shared generation settings used by request types.
    //!
    //! ```rust
    //! use vcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_tokens(128)
    //!     .enable_streaming();
    //!
    //! assert_eq!(options.temperature, 0.2);
    //! assert_eq!(options.max_tokens, 128);
    //! assert!(options.stream);
    //! ```

    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GenerationOptions {
        pub temperature: f32,
        pub max_tokens: u32,
        pub stream: bool,
    }

    impl Default for GenerationOptions {
        fn default() -> Self {
            Self {
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
                stream: false,
            }
        }
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = temperature;
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = max_tokens;
            self
        }

        pub fn with_streaming(mut self, stream: bool) -> Self {
            self.stream = stream;
            self
        }

        pub fn enable_streaming(self) -> Self {
            self.with_streaming(true)
        }
    }
}

pub use future::BoxFuture;
pub use id::TurnId;
pub use model::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationOptions};
