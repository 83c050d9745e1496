//! Layered configuration for one application and an optional instance.
//!
//! A [`Config`] starts unlocked and accumulates [`ConfigSource`] layers in
//! three working sections: the application section, the instance section
//! (only with an instance name) and the shared `default` section. Locking
//! folds the application section and then the instance section over the
//! defaults and freezes the result. Queries are only possible once locked.

mod node;

pub use node::ConfigNode;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::keywords::{DEFAULT_NODE, INSTANCE_NODE, ROOT_NODE, compose_name, join_path};
use crate::merge::MergeProcessor;
use crate::{ConfigSource, OutputStyle, RawTree, StrataError, StrataResult};

/// Sections accumulated while the config is unlocked.
#[derive(Clone, Debug, Default)]
struct WorkingTree {
    instance: Option<RawTree>,
    app: RawTree,
    default: RawTree,
}

/// Frozen result shared by every view of a locked config.
#[derive(Debug)]
pub(crate) struct Frozen {
    app_name: String,
    instance_name: String,
    section: RawTree,
}

#[derive(Clone, Debug)]
enum State {
    Unlocked(WorkingTree),
    Locked(Arc<Frozen>),
}

/// Configuration of one application, optionally specialised for an instance.
///
/// # Examples
///
/// ```
/// use strata_config::{Config, ConfigSource};
///
/// let source = ConfigSource::parse(
///     "<config><default><net><retries>3</retries><timeout>30</timeout></net></default>\
///      <app><net><retries>5</retries></net></app>\
///      <app..eu><region>eu-west</region></app..eu></config>",
/// )?;
/// let mut config = Config::with_instance("app", "eu")?;
/// config.merge(&source)?;
/// config.lock()?;
/// assert_eq!(config.name(), "app..eu");
/// assert_eq!(config.get_as::<u8>("net.retries")?, 5);
/// assert_eq!(config.get_as::<u8>("net.timeout")?, 30);
/// assert_eq!(config.get("region")?, "eu-west");
/// # Ok::<(), std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    app_name: String,
    instance_name: String,
    state: State,
}

impl Config {
    /// Creates an unlocked config for `app_name`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::EmptyConfigName`] when the trimmed name is empty.
    pub fn new(app_name: &str) -> StrataResult<Self> {
        Self::with_instance(app_name, "")
    }

    /// Creates an unlocked config for one instance of `app_name`.
    ///
    /// Both names are trimmed; an empty instance name means no instance.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::EmptyConfigName`] when the trimmed application
    /// name is empty.
    pub fn with_instance(app_name: &str, instance_name: &str) -> StrataResult<Self> {
        let app = app_name.trim();
        if app.is_empty() {
            return Err(Arc::new(StrataError::EmptyConfigName));
        }
        let instance = instance_name.trim();
        let working = WorkingTree {
            instance: (!instance.is_empty()).then(RawTree::new),
            ..WorkingTree::default()
        };
        Ok(Self {
            app_name: app.to_owned(),
            instance_name: instance.to_owned(),
            state: State::Unlocked(working),
        })
    }

    /// Returns the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the instance name, empty when there is none.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Returns `app` or `app..instance`.
    #[must_use]
    pub fn name(&self) -> String {
        compose_name(&self.app_name, &self.instance_name, "")
    }

    /// Returns `true` once [`Config::lock`] has succeeded.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self.state, State::Locked(_))
    }

    /// Folds one source into the working sections.
    ///
    /// The source's `default` section goes into the defaults, its section
    /// for this application into the application section and, with an
    /// instance name, its `instance.<name>` subsection into the instance
    /// section. Sources without a section for this application only
    /// contribute defaults. A failed merge leaves the config unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Locked`] after [`Config::lock`], or
    /// [`StrataError::AmbiguousMerge`] when repeated siblings cannot be
    /// paired.
    pub fn merge(&mut self, source: &ConfigSource) -> StrataResult<()> {
        let config_name = self.name();
        let State::Unlocked(working) = &mut self.state else {
            return Err(Arc::new(StrataError::Locked { config_name }));
        };
        let Some(layer) = source.config() else {
            return Ok(());
        };
        let processor = MergeProcessor::new(&config_name, source.name());
        let mut next = working.clone();
        if let Some(defaults) = layer.find(DEFAULT_NODE) {
            processor.merge(&mut next.default, defaults)?;
        }
        if let Some(app) = layer.find(&self.app_name) {
            processor.merge(&mut next.app, app)?;
            if let Some(instance) = next.instance.as_mut()
                && let Some(section) = app
                    .find(INSTANCE_NODE)
                    .and_then(|wrapper| wrapper.find(&self.instance_name))
            {
                processor.merge(instance, section)?;
            }
        }
        *working = next;
        tracing::debug!(config = %config_name, source = %source.name(), "merged config source");
        Ok(())
    }

    /// Freezes the config.
    ///
    /// The application section is folded over the defaults, then the
    /// instance section over the result. Locking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::AmbiguousMerge`] when the sections cannot be
    /// combined; the config then stays unlocked and unchanged.
    pub fn lock(&mut self) -> StrataResult<()> {
        let State::Unlocked(working) = &self.state else {
            return Ok(());
        };
        let defaults_name = join_path(ROOT_NODE, DEFAULT_NODE);
        let config_name = self.name();
        let mut section = working.default.clone();
        MergeProcessor::new(&defaults_name, &self.app_name).merge(&mut section, &working.app)?;
        if let Some(instance) = &working.instance {
            MergeProcessor::new(&defaults_name, &config_name).merge(&mut section, instance)?;
        }
        tracing::debug!(config = %config_name, nodes = section.len(), "locked config");
        self.state = State::Locked(Arc::new(Frozen {
            app_name: self.app_name.clone(),
            instance_name: self.instance_name.clone(),
            section,
        }));
        Ok(())
    }

    /// Returns a view of the whole frozen config.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`].
    pub fn root(&self) -> StrataResult<ConfigNode> {
        match &self.state {
            State::Locked(frozen) => Ok(ConfigNode::root(Arc::clone(frozen))),
            State::Unlocked(_) => Err(Arc::new(StrataError::NotFinished {
                config_name: self.name(),
            })),
        }
    }

    /// See [`ConfigNode::get`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get`].
    pub fn get(&self, attr: &str) -> StrataResult<String> {
        self.root()?.get(attr)
    }

    /// See [`ConfigNode::get_as`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_as`].
    pub fn get_as<T>(&self, attr: &str) -> StrataResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.root()?.get_as(attr)
    }

    /// See [`ConfigNode::get_optional`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_optional`].
    pub fn get_optional(&self, attr: &str) -> StrataResult<Option<String>> {
        self.root()?.get_optional(attr)
    }

    /// See [`ConfigNode::get_optional_as`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_optional_as`].
    pub fn get_optional_as<T>(&self, attr: &str) -> StrataResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.root()?.get_optional_as(attr)
    }

    /// See [`ConfigNode::get_or`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_or`].
    pub fn get_or(&self, attr: &str, default_value: impl Into<String>) -> StrataResult<String> {
        self.root()?.get_or(attr, default_value)
    }

    /// See [`ConfigNode::get_or_as`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_or_as`].
    pub fn get_or_as<T>(&self, attr: &str, default_value: T) -> StrataResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.root()?.get_or_as(attr, default_value)
    }

    /// See [`ConfigNode::get_node`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_node`].
    pub fn get_node(&self, path: &str) -> StrataResult<ConfigNode> {
        self.root()?.get_node(path)
    }

    /// See [`ConfigNode::get_node_optional`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`].
    pub fn get_node_optional(&self, path: &str) -> StrataResult<Option<ConfigNode>> {
        Ok(self.root()?.get_node_optional(path))
    }

    /// See [`ConfigNode::get_children_of`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFinished`] before [`Config::lock`], otherwise
    /// the errors of [`ConfigNode::get_children_of`].
    pub fn get_children_of(&self, parent_path: &str) -> StrataResult<Vec<ConfigNode>> {
        self.root()?.get_children_of(parent_path)
    }
}

impl fmt::Display for Config {
    /// Renders the frozen tree like [`ConfigNode`], or the working sections
    /// under `config` while unlocked.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Locked(frozen) => fmt::Display::fmt(&ConfigNode::root(Arc::clone(frozen)), f),
            State::Unlocked(working) => {
                let mut sections = RawTree::new();
                if let Some(instance) = &working.instance {
                    sections.push_child(self.instance_name.as_str(), instance.clone());
                }
                sections.push_child(self.app_name.as_str(), working.app.clone());
                sections.push_child(DEFAULT_NODE, working.default.clone());
                RawTree::new()
                    .with_child(ROOT_NODE, sections)
                    .write_children(f, OutputStyle::Pretty)
            }
        }
    }
}
