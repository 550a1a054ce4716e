use crate::config::install::InstallConfig;
use crate::config::package::Package;
use crate::core::case::{create_dir_strict, CaseBuilder};
use crate::core::coupling::CouplingBuilder;
use crate::core::template;
use crate::domain::model::{Study, Verbosity};
use crate::domain::ports::CaseFactory;
use crate::utils::error::{Result, ScaffoldError};
use std::fs;
use std::path::{Path, PathBuf};

/// Runs the whole creation workflow: study directory, primary cases,
/// companion solver cases, coupling.
pub struct StudyBuilder<F: CaseFactory> {
    study: Study,
    package: Package,
    config: InstallConfig,
    syrthes: F,
}

impl<F: CaseFactory> StudyBuilder<F> {
    pub fn new(study: Study, package: Package, config: InstallConfig, syrthes: F) -> Self {
        Self {
            study,
            package,
            config,
            syrthes,
        }
    }

    pub fn study(&self) -> &Study {
        &self.study
    }

    /// Create the study under `base` and return the study root. When `base`
    /// is already named after the study, everything is created in place.
    pub fn create_in(&self, base: &Path) -> Result<PathBuf> {
        let repbase = if base.file_name() == Some(std::ffi::OsStr::new(&self.study.name)) {
            base.to_path_buf()
        } else {
            if self.study.verbosity > Verbosity::Quiet {
                println!("  o Creating study '{}'...", self.study.name);
            }
            let dir = base.join(&self.study.name);
            create_dir_strict(&dir)?;
            fs::create_dir(dir.join("MESH"))?;
            fs::create_dir(dir.join("POST"))?;
            dir
        };

        // Creating primary cases
        let case_builder = CaseBuilder::new(&self.study, &self.package, &self.config);
        for c in &self.study.cases {
            case_builder.create(&repbase, c)?;
        }

        // Creating SYRTHES cases
        if !self.study.syr_case_names.is_empty() {
            self.create_syrthes_cases(&repbase)?;
        }

        // Creating Code_Aster case
        if self.study.ast_case_name.is_some() {
            self.create_aster_case(&repbase)?;
        }

        // Creating coupling structure
        if self.study.domain_count() > 1 {
            CouplingBuilder::new(&self.study, &self.package, &self.config).create(&repbase)?;
        }

        Ok(repbase)
    }

    fn create_syrthes_cases(&self, repbase: &Path) -> Result<()> {
        if !self.config.has("install", "syrthes") {
            return Err(ScaffoldError::MissingInstallation {
                solver: "SYRTHES".to_string(),
            });
        }
        let install = PathBuf::from(self.config.get("install", "syrthes")?);

        for name in &self.study.syr_case_names {
            if self.study.verbosity > Verbosity::Quiet {
                println!("  o Creating SYRTHES case  '{}'...", name);
            }
            self.syrthes.create_case(&install, repbase, name)?;
        }

        Ok(())
    }

    fn create_aster_case(&self, repbase: &Path) -> Result<()> {
        let Some(name) = self.study.ast_case_name.as_deref() else {
            return Ok(());
        };

        if !self.config.has("install", "aster") {
            return Err(ScaffoldError::MissingInstallation {
                solver: "Code_Aster".to_string(),
            });
        }
        let asterhome = self.config.get("install", "aster")?;

        if self.study.verbosity > Verbosity::Quiet {
            println!("  o Creating Code_Aster case  '{}'...", name);
        }

        let case_dir = repbase.join(name);
        create_dir_strict(&case_dir)?;

        // Results directory shared with the coupled run
        create_dir_strict(&repbase.join("RESU_COUPLING"))?;

        let datadir = self.package.pkgdatadir();

        let runcase_template = datadir.join("runcase_aster");
        let text =
            fs::read_to_string(&runcase_template).map_err(|e| ScaffoldError::RequiredCopy {
                what: "runcase_coupling script".to_string(),
                path: runcase_template.clone(),
                source: e,
            })?;

        let fsi_export = datadir.join("salome").join("fsi.export");
        fs::copy(&fsi_export, case_dir.join("fsi.export")).map_err(|e| {
            ScaffoldError::RequiredCopy {
                what: "fsi.export file".to_string(),
                path: fsi_export.clone(),
                source: e,
            }
        })?;

        let repbase_str = repbase.display().to_string();
        let first_case = self.study.cases.first().map(String::as_str).unwrap_or_default();
        // CASEDIRNAME must be substituted before its CASENAME substring.
        let rendered = template::render_str(
            &text,
            &[
                ("CASEDIRNAME", repbase_str.as_str()),
                ("CASENAME", first_case),
                ("ASTERNAME", name),
                ("STUDYNAME", self.study.name.as_str()),
                ("ASTERHOME", asterhome),
            ],
        );

        template::write_executable(&repbase.join("runcase_coupling"), &rendered)
    }
}
