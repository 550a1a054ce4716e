use crate::config::install::InstallConfig;
use crate::config::package::Package;
use crate::core::template;
use crate::domain::model::Study;
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::shell;
use std::fs;
use std::path::{Path, PathBuf};

/// Some batch systems limit job names to 15 characters.
const BATCH_NAME_LIMIT: usize = 15;

/// Builds the `runcase` launch script of a case (or the `runcase_batch`
/// wrapper of a coupled run), rendering the configured batch-system template
/// when one is installed.
pub struct BatchFileBuilder<'a> {
    study: &'a Study,
    package: &'a Package,
    config: &'a InstallConfig,
}

impl<'a> BatchFileBuilder<'a> {
    pub fn new(study: &'a Study, package: &'a Package, config: &'a InstallConfig) -> Self {
        Self {
            study,
            package,
            config,
        }
    }

    pub fn build(&self, distrep: &Path, casename: &str, scriptname: Option<&str>) -> Result<()> {
        let batch_file = match scriptname {
            Some("runcase_coupling") => distrep.join("runcase_batch"),
            _ => distrep.join("runcase"),
        };
        tracing::debug!("Writing batch script {}", batch_file.display());

        let mut contents = String::from(shell::SHEBANG);
        contents.push_str(&shell::generated_stamp("study-gen", &self.package.version));

        if self.config.has("install", "batch") {
            let template_name = self.config.get("install", "batch")?;
            let template_path = if Path::new(template_name).is_absolute() {
                PathBuf::from(template_name)
            } else {
                self.package
                    .batchdir()
                    .join(format!("batch.{}", template_name))
            };

            let text =
                fs::read_to_string(&template_path).map_err(|e| ScaffoldError::RequiredCopy {
                    what: "batch system template".to_string(),
                    path: template_path.clone(),
                    source: e,
                })?;

            let job_name = batch_job_name(&self.study.name, casename);
            contents.push_str(&template::render_str(&text, &[("nameandcase", &job_name)]));
        } else {
            contents.push('\n');
        }

        match scriptname {
            Some(script) => {
                contents.push_str(&shell::script_comment("Launch script:"));
                contents.push_str(&format!("./{}\n\n", script));
            }
            None => {
                contents.push_str(&shell::script_comment("Ensure the correct command is found:"));
                contents.push_str(&shell::prepend_path("PATH", &self.package.bindir()));
                contents.push_str(&shell::script_comment("Run command:"));
                // Leading backslash bypasses any shell alias for the command.
                contents.push_str(&format!("\\{} run\n", self.package.name));
            }
        }

        template::write_executable(&batch_file, &contents)
    }
}

/// Lowercased study+case concatenation, truncated to the batch-system limit.
fn batch_job_name(study_name: &str, casename: &str) -> String {
    let full = format!("{}{}", study_name.to_lowercase(), casename.to_lowercase());
    full.chars().take(BATCH_NAME_LIMIT).collect()
}
