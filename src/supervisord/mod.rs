// src/supervisord/mod.rs

//! Supervisor integration.
//!
//! A [`SupervisordProvider`] names a task namespace and may customise the
//! generated program file; [`SupervisordTasks`] turns any provider into the
//! six tasks `dependencies`, `write-conf`, `start`, `stop`, `restart` and
//! `status` under that namespace.

pub mod conf_file;
pub mod tasks;

use std::rc::Rc;

use crate::config::Config;
use crate::exec::Host;
use crate::task::{Task, TaskProvider};

pub use conf_file::{AutoRestart, SupervisordConfFile};

/// Directory supervisord reads program files from.
pub const CONF_DIRECTORY: &str = "/etc/supervisor/conf.d";

/// Main supervisord configuration file.
pub const SUPERVISORD_CONF: &str = "/etc/supervisor/supervisord.conf";

pub trait SupervisordProvider {
    /// Namespace of this provider's tasks; `"svr"` gives `svr:start` etc.
    fn task_namespace(&self) -> &str;

    /// Program file deployed by `write-conf` on `host`.
    ///
    /// The environment block is filled in from the configuration afterwards.
    fn conf_file(&self, config: &Config, _host: &Host) -> SupervisordConfFile {
        SupervisordConfFile::new(self.supervisord_name(config), config)
    }

    /// `[supervisord].name`, falling back to the project name.
    fn supervisord_name(&self, config: &Config) -> String {
        config
            .supervisord_name()
            .unwrap_or_else(|| config.project_name())
            .to_string()
    }

    fn conf_file_path(&self, config: &Config) -> String {
        format!("{CONF_DIRECTORY}/{}.conf", self.supervisord_name(config))
    }
}

/// Provider with every default, registered under `namespace`.
#[derive(Debug, Clone)]
pub struct DefaultSupervisord {
    namespace: String,
}

impl DefaultSupervisord {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl SupervisordProvider for DefaultSupervisord {
    fn task_namespace(&self) -> &str {
        &self.namespace
    }
}

/// Task factory for a [`SupervisordProvider`].
pub struct SupervisordTasks<P> {
    provider: Rc<P>,
}

impl<P: SupervisordProvider + 'static> SupervisordTasks<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Rc::new(provider),
        }
    }
}

impl<P: SupervisordProvider + 'static> TaskProvider for SupervisordTasks<P> {
    fn create_tasks(&self) -> Vec<Task> {
        vec![
            tasks::dependencies(Rc::clone(&self.provider)),
            tasks::write_conf(Rc::clone(&self.provider)),
            tasks::start(Rc::clone(&self.provider)),
            tasks::stop(Rc::clone(&self.provider)),
            tasks::restart(Rc::clone(&self.provider)),
            tasks::status(Rc::clone(&self.provider)),
        ]
    }
}
