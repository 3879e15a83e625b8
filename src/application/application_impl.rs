use std::path::Path;

use colored::Colorize;
use fs_teardown::{FileTree, FileTreeParseError, Teardown, TeardownError, TeardownOptions};
use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::debug;

use crate::application::{RuntimeConfig, Step};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Running with config: {:?}", app_config);

        let mut options = TeardownOptions::new(&app_config.root)
            .with_base(app_config.root_base().context(WorkingDirSnafu)?);

        match &app_config.step {
            Step::Prepare { tree } => {
                if let Some(tree_path) = tree {
                    let tree = FileTree::read(tree_path).await.context(TreeFileSnafu)?;
                    debug!("Loaded tree with {} top-level entries", tree.len());
                    options = options.with_paths(tree);
                }

                let root = Teardown::new(options)
                    .prepare()
                    .await
                    .context(RootSnafu)?;
                report("prepared", &root);
            }
            Step::Cleanup => {
                let mut teardown = Teardown::new(options);
                teardown.cleanup().await.context(RootSnafu)?;
                report("removed", teardown.root());
            }
        }

        Ok(())
    }
}

fn report(verb: &str, root: &Path) {
    if supports_color::on(Stream::Stdout).is_some() {
        println!("{} {}", verb.green().bold(), root.display());
    } else {
        println!("{} {}", verb, root.display());
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to determine the working directory"))]
    WorkingDirError { source: std::io::Error },
    #[snafu(display("Critical failure encountered while loading the tree file"))]
    TreeFileError { source: FileTreeParseError },
    #[snafu(display("Critical failure encountered while managing the root directory"))]
    RootError { source: TeardownError },
}
