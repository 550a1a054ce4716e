use crate::config::install::InstallConfig;
use crate::config::package::Package;
use crate::core::batch::BatchFileBuilder;
use crate::core::template;
use crate::domain::model::{Study, Verbosity};
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::shell;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Thermochemical data and meteo template seeded into DATA/REFERENCE.
/// Best-effort: files missing from the installation are skipped.
const REFERENCE_DATA_FILES: &[&str] = &[
    "dp_C3P",
    "dp_C3PSJ",
    "dp_ELE",
    "dp_FCP",
    "dp_FCP.xml",
    "dp_FCP_new",
    "dp_FUE",
    "dp_FUE_new",
    "meteo",
];

/// User source files copied over by --copy-from.
const SOURCE_EXTENSIONS: &[&str] = &["c", "cxx", "cpp", "h", "hxx", "hpp", "f90", "F90"];

/// Never copied between cases; regenerated by the preprocessor.
const PREPROCESSOR_OUTPUT: &str = "preprocessor_output";

pub struct CaseBuilder<'a> {
    study: &'a Study,
    package: &'a Package,
    config: &'a InstallConfig,
}

impl<'a> CaseBuilder<'a> {
    pub fn new(study: &'a Study, package: &'a Package, config: &'a InstallConfig) -> Self {
        Self {
            study,
            package,
            config,
        }
    }

    /// Create one case directory under `repbase` with its DATA, SRC, RESU
    /// and SCRIPTS subtree.
    pub fn create(&self, repbase: &Path, casename: &str) -> Result<()> {
        if self.study.verbosity > Verbosity::Quiet {
            println!("  o Creating case  '{}'...", casename);
        }
        tracing::debug!("Creating case '{}' in {}", casename, repbase.display());

        let datadir = self.package.pkgdatadir();

        let case_dir = repbase.join(casename);
        create_dir_strict(&case_dir)?;

        // Data directory

        let data = case_dir.join("DATA");
        fs::create_dir(&data)?;

        if self.study.use_ref {
            let thch_distpath = datadir.join("data").join("thch");
            let ref_dir = data.join("REFERENCE");
            fs::create_dir(&ref_dir)?;

            for f in REFERENCE_DATA_FILES {
                let abs_f = thch_distpath.join(f);
                if abs_f.is_file() {
                    fs::copy(&abs_f, ref_dir.join(f))?;
                }
            }

            let script_name = format!("{}_user_scripts.py", self.package.name);
            let script_template = datadir.join(&script_name);
            fs::copy(&script_template, ref_dir.join(&script_name)).map_err(|e| {
                ScaffoldError::RequiredCopy {
                    what: "user scripts template".to_string(),
                    path: script_template.clone(),
                    source: e,
                }
            })?;
        }

        self.write_gui_script(&data)?;

        // User source files directory

        let src = case_dir.join("SRC");
        fs::create_dir(&src)?;

        if self.study.use_ref {
            let user_distpath = datadir.join("user");
            copy_tree(&user_distpath, &src.join("REFERENCE")).map_err(|e| copy_tree_error(
                "user reference sources",
                &user_distpath,
                e,
            ))?;

            let user_examples_distpath = datadir.join("user_examples");
            copy_tree(&user_examples_distpath, &src.join("EXAMPLES")).map_err(|e| {
                copy_tree_error("user example sources", &user_examples_distpath, e)
            })?;
        }

        // Copy data and source files from another case

        if let Some(copy_from) = &self.study.copy_from {
            self.copy_case_data(copy_from, &data)?;
            self.copy_case_sources(copy_from, &src)?;
        }

        // Results directory

        fs::create_dir(case_dir.join("RESU"))?;

        // Script directory

        let scripts = case_dir.join("SCRIPTS");
        fs::create_dir(&scripts)?;

        BatchFileBuilder::new(self.study, self.package, self.config).build(
            &scripts,
            casename,
            None,
        )
    }

    /// Wrapper script launching the GUI on this case's data, with the
    /// package bin directory put first on the PATH.
    fn write_gui_script(&self, data: &Path) -> Result<()> {
        let guiscript = data.join(&self.package.guiname);

        let mut contents = String::from(shell::SHEBANG);
        contents.push_str(&shell::generated_stamp("study-gen", &self.package.version));
        contents.push_str(&shell::script_comment("Ensure the correct command is found:"));
        contents.push_str(&shell::prepend_path("PATH", &self.package.bindir()));
        contents.push_str(&shell::script_comment("Run command:"));
        // Leading backslash bypasses any shell alias for the command.
        contents.push_str(&format!(
            "\\{} gui {}\n",
            self.package.name,
            shell::positional_args()
        ));

        template::write_executable(&guiscript, &contents)
    }

    /// Every regular file of the source case's DATA, except the GUI
    /// launcher and the preprocessor output.
    fn copy_case_data(&self, copy_from: &Path, data: &Path) -> Result<()> {
        let ref_data = copy_from.join("DATA");

        for entry in fs::read_dir(&ref_data)? {
            let entry = entry?;
            let name = entry.file_name();
            if !entry.path().is_file() {
                continue;
            }
            if name == OsStr::new(&self.package.guiname)
                || name == OsStr::new(PREPROCESSOR_OUTPUT)
            {
                continue;
            }
            fs::copy(entry.path(), data.join(&name))?;
        }

        Ok(())
    }

    /// Only user source files of the allowlisted languages move between
    /// cases.
    fn copy_case_sources(&self, copy_from: &Path, src: &Path) -> Result<()> {
        let ref_src = copy_from.join("SRC");

        for entry in fs::read_dir(&ref_src)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .and_then(OsStr::to_str)
                .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if matches {
                fs::copy(&path, src.join(entry.file_name()))?;
            }
        }

        Ok(())
    }
}

/// `fs::create_dir` with the existing-directory case reported as a
/// precondition failure rather than a bare IO error.
pub(crate) fn create_dir_strict(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            ScaffoldError::AlreadyExists(path.to_path_buf())
        } else {
            e.into()
        }
    })
}

fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn copy_tree_error(what: &str, path: &Path, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::RequiredCopy {
        what: what.to_string(),
        path: path.to_path_buf(),
        source,
    }
}
