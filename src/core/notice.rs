//! Notice construction: one fully assembled error report.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::core::backtrace::{self, scrub, Frame};
use crate::core::config::Configuration;
use crate::core::token::{TokenGenerator, UuidTokenGenerator};
use crate::error::Result;

/// Free-form JSON object used by the request sections of a notice
pub type Hash = Map<String, Value>;

macro_rules! hash_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Hash);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.0.insert(key.into(), value.into());
                self
            }

            pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
                self.0.insert(key.into(), value.into())
            }

            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<Hash> for $name {
            fn from(hash: Hash) -> Self {
                Self(hash)
            }
        }

        impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            }
        }
    };
}

hash_newtype!(
    /// Metadata that accumulates across inputs
    Context
);
hash_newtype!(
    /// Request parameters
    Params
);
hash_newtype!(
    /// CGI-style request environment
    CgiData
);

impl Context {
    /// Merge `other` into this context. Keys in `other` overwrite.
    pub fn update(&mut self, other: Context) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }
}

/// Optional data supplied alongside an error when building a notice.
#[derive(Debug, Clone, PartialEq)]
pub enum Extra {
    /// Merged into the notice context
    Context(Context),
    /// Replaces the notice params
    Params(Params),
    /// Replaces the notice CGI data
    CgiData(CgiData),
    Url(Url),
}

impl From<Context> for Extra {
    fn from(context: Context) -> Self {
        Extra::Context(context)
    }
}

impl From<Params> for Extra {
    fn from(params: Params) -> Self {
        Extra::Params(params)
    }
}

impl From<CgiData> for Extra {
    fn from(cgi_data: CgiData) -> Self {
        Extra::CgiData(cgi_data)
    }
}

impl From<Url> for Extra {
    fn from(url: Url) -> Self {
        Extra::Url(url)
    }
}

/// A captured application error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    pub message: String,
    pub class: String,
    pub stack: Vec<Frame>,
}

impl Error {
    pub fn new(message: impl Into<String>, class: impl Into<String>, stack: Vec<Frame>) -> Self {
        Self {
            message: message.into(),
            class: class.into(),
            stack,
        }
    }

    /// Capture `err` together with the current stack.
    ///
    /// The class is the short name of the error's type.
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        Self {
            message: err.to_string(),
            class: short_type_name::<E>().to_string(),
            stack: backtrace::capture(),
        }
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// One error report, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub api_key: String,
    pub error: Error,
    pub token: String,
    pub error_message: String,
    pub error_class: String,
    pub hostname: String,
    pub env: String,
    pub backtrace: Vec<Frame>,
    pub project_root: String,
    pub context: Context,
    pub params: Option<Params>,
    pub cgi_data: Option<CgiData>,
    pub url: String,
}

impl Notice {
    /// Build a notice with a fresh random token.
    pub fn new<I>(config: &Configuration, err: Error, extras: I) -> Result<Self>
    where
        I: IntoIterator<Item = Extra>,
    {
        NoticeBuilder::new(config).build(err, extras)
    }

    /// Merge `context` into the notice context. Keys in `context` overwrite.
    pub fn set_context(&mut self, context: Context) {
        self.context.update(context);
    }

    fn apply(&mut self, extra: Extra) {
        match extra {
            Extra::Context(context) => self.set_context(context),
            Extra::Params(params) => self.params = Some(params),
            Extra::CgiData(cgi_data) => self.cgi_data = Some(cgi_data),
            Extra::Url(url) => self.url = url.to_string(),
        }
    }
}

/// Builds notices from a configuration.
///
/// The token generator and a base context can be substituted, which the
/// client uses to seed its own context into every notice.
pub struct NoticeBuilder<'a> {
    config: &'a Configuration,
    tokens: Arc<dyn TokenGenerator>,
    context: Context,
}

impl<'a> NoticeBuilder<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            tokens: Arc::new(UuidTokenGenerator),
            context: Context::new(),
        }
    }

    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn build<I>(self, err: Error, extras: I) -> Result<Notice>
    where
        I: IntoIterator<Item = Extra>,
    {
        let token = self.tokens.generate()?;
        let backtrace = scrub(&err.stack, &self.config.root).into_owned();

        let mut notice = Notice {
            api_key: self.config.api_key.clone(),
            token,
            error_message: err.message.clone(),
            error_class: err.class.clone(),
            hostname: self.config.hostname.clone(),
            env: self.config.env.clone(),
            backtrace,
            project_root: self.config.root.clone(),
            context: self.context,
            params: None,
            cgi_data: None,
            url: String::new(),
            error: err,
        };

        for extra in extras {
            notice.apply(extra);
        }

        Ok(notice)
    }
}
