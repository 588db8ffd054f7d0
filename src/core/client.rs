use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::core::backend::Feature;
use crate::core::config::Configuration;
use crate::core::notice::{Context, Error, Extra, Notice, NoticeBuilder};
use crate::core::token::{TokenGenerator, UuidTokenGenerator};
use crate::error::{HoneybadgerError, Result};

/// Builds notices from a shared configuration and hands them to its backend.
pub struct Client {
    config: RwLock<Arc<Configuration>>,
    context: Mutex<Context>,
    tokens: Arc<dyn TokenGenerator>,
}

impl Client {
    /// Create a client, resolving `overrides` against the process environment
    pub fn new(overrides: Configuration) -> Self {
        Self::with_config(Configuration::resolve(overrides))
    }

    /// Create a client from an already resolved configuration
    pub fn with_config(config: Configuration) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            context: Mutex::new(Context::new()),
            tokens: Arc::new(UuidTokenGenerator),
        }
    }

    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<Configuration> {
        self.config.read().clone()
    }

    /// Layer `overrides` on top of the current configuration.
    ///
    /// Later notices are built and delivered with the merged snapshot.
    pub fn configure(&self, overrides: Configuration) {
        let mut config = self.config.write();
        let merged = Configuration::clone(&config).merge(overrides);
        *config = Arc::new(merged);
    }

    /// Merge `context` into the context attached to every future notice
    pub fn set_context(&self, context: Context) {
        self.context.lock().update(context);
    }

    pub fn context(&self) -> Context {
        self.context.lock().clone()
    }

    /// Build a notice without sending it
    pub fn build_notice<I>(&self, err: Error, extras: I) -> Result<Notice>
    where
        I: IntoIterator<Item = Extra>,
    {
        self.build_with(&self.config(), err, extras)
    }

    fn build_with<I>(&self, config: &Configuration, err: Error, extras: I) -> Result<Notice>
    where
        I: IntoIterator<Item = Extra>,
    {
        NoticeBuilder::new(config)
            .with_token_generator(self.tokens.clone())
            .with_context(self.context())
            .build(err, extras)
    }

    /// Build a notice and deliver it once. Returns the notice token.
    pub fn notify<I>(&self, err: Error, extras: I) -> Result<String>
    where
        I: IntoIterator<Item = Extra>,
    {
        let config = self.config();
        let notice = self.build_with(&config, err, extras)?;

        let backend = config
            .backend
            .as_ref()
            .ok_or_else(|| HoneybadgerError::config("no backend configured"))?;

        if let Err(e) = backend.notify(Feature::Notices, &notice, &config) {
            config.log(format_args!("notify failed for {}: {}", notice.token, e));
            return Err(e);
        }

        Ok(notice.token)
    }
}
