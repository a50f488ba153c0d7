#![allow(dead_code)]

use std::collections::BTreeMap;

use supervisor_tasks::config::{
    validate_config, CommandTaskConfig, Config, ProjectSection, ServerConfig, SupervisordSection,
};

/// Builder for `Config` to simplify test setup.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(project: &str) -> Self {
        Self {
            config: Config {
                project: ProjectSection {
                    name: project.to_string(),
                    deploy_directory: "/home/deploy".to_string(),
                    current_directory: None,
                    executable: None,
                    output_log: None,
                    error_log: None,
                },
                supervisord: SupervisordSection::default(),
                environment: None,
                server: Vec::new(),
                task: Default::default(),
            },
        }
    }

    pub fn supervisord_name(mut self, name: &str) -> Self {
        self.config.supervisord.name = Some(name.to_string());
        self
    }

    pub fn supervisord_user(mut self, user: &str) -> Self {
        self.config.supervisord.user = Some(user.to_string());
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.supervisord.namespace = namespace.to_string();
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.config
            .environment
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn output_log(mut self, path: &str) -> Self {
        self.config.project.output_log = Some(path.to_string());
        self
    }

    pub fn error_log(mut self, path: &str) -> Self {
        self.config.project.error_log = Some(path.to_string());
        self
    }

    pub fn server(mut self, host: &str) -> Self {
        self.config.server.push(ServerConfig {
            host: host.to_string(),
            user: None,
            port: None,
            identity_file: None,
        });
        self
    }

    pub fn command_task(mut self, id: &str, cmd: &str) -> Self {
        self.config.task.insert(
            id.to_string(),
            CommandTaskConfig {
                cmd: cmd.to_string(),
                before: Vec::new(),
                after: Vec::new(),
            },
        );
        self
    }

    pub fn build(self) -> Config {
        validate_config(&self.config, false).expect("Failed to build valid config from builder");
        self.config
    }
}
