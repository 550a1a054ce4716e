use crate::config::install::InstallConfig;
use crate::config::package::Package;
use crate::core::batch::BatchFileBuilder;
use crate::core::template;
use crate::domain::model::{Study, Verbosity};
use crate::utils::error::{Result, ScaffoldError};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One executable domain of a coupled run, as embedded in the generated
/// `runcase_coupling` script.
#[derive(Debug, Clone, Serialize)]
pub struct DomainRecord {
    pub solver: String,
    pub domain: String,
    pub script: String,
    pub n_procs_weight: Option<u32>,
    pub n_procs_min: u32,
    pub n_procs_max: Option<u32>,
    /// Free-form solver options; present only for SYRTHES domains.
    pub opt: Option<String>,
}

/// Domain records in execution order: primary cases first (CLI order), then
/// SYRTHES cases (CLI order).
pub fn domain_records(study: &Study, solver_name: &str) -> Vec<DomainRecord> {
    let mut records = Vec::with_capacity(study.domain_count());

    for c in &study.cases {
        records.push(DomainRecord {
            solver: solver_name.to_string(),
            domain: c.clone(),
            script: "runcase".to_string(),
            n_procs_weight: None,
            n_procs_min: 1,
            n_procs_max: None,
            opt: None,
        });
    }

    for s in &study.syr_case_names {
        records.push(DomainRecord {
            solver: "SYRTHES".to_string(),
            domain: s.clone(),
            script: "syrthes_data.syd".to_string(),
            n_procs_weight: None,
            n_procs_min: 1,
            n_procs_max: None,
            opt: Some(String::new()),
        });
    }

    records
}

fn py_opt_int(value: Option<u32>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "None".to_string(),
    }
}

/// Serialize the records into the literal block substituted for `APP_DICTS`
/// in the coupling script template.
pub fn serialize_domains(records: &[DomainRecord]) -> String {
    let mut out = String::new();

    for record in records {
        if !out.is_empty() {
            // Separating comma after the first domain
            out.push_str("\n    ,");
        }

        out.push_str(&format!(
            "\n    {{'solver': '{}',\n     'domain': '{}',\n     'script': '{}',\n     'n_procs_weight': {},\n     'n_procs_min': {},\n     'n_procs_max': {}",
            record.solver,
            record.domain,
            record.script,
            py_opt_int(record.n_procs_weight),
            record.n_procs_min,
            py_opt_int(record.n_procs_max),
        ));

        match &record.opt {
            Some(opt) => out.push_str(&format!(
                ",\n     'opt' : '{}'}}               # Additional SYRTHES options\n                               # (ex.: postprocessing with '-v ens' or '-v med')\n",
                opt
            )),
            None => out.push_str("}\n"),
        }
    }

    out
}

/// Import line giving the coupling script access to the SYRTHES data
/// modules, when SYRTHES is installed.
pub fn syrthes_path_line(config: &InstallConfig) -> Option<String> {
    match config.get("install", "syrthes") {
        Ok(install) => {
            let datapath = Path::new(install).join("share").join("syrthes");
            Some(format!("sys.path.insert(1, '{}')\n", datapath.display()))
        }
        Err(_) => None,
    }
}

/// Insert `insert` right after the first line starting with `prefix`. At
/// most one insertion; the text is returned unchanged when no line matches.
pub fn insert_after_line_prefix(text: &str, prefix: &str, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + insert.len());
    let mut done = false;

    for line in text.split_inclusive('\n') {
        out.push_str(line);
        if !done && line.starts_with(prefix) {
            out.push_str(insert);
            done = true;
        }
    }

    out
}

pub struct CouplingBuilder<'a> {
    study: &'a Study,
    package: &'a Package,
    config: &'a InstallConfig,
}

impl<'a> CouplingBuilder<'a> {
    pub fn new(study: &'a Study, package: &'a Package, config: &'a InstallConfig) -> Self {
        Self {
            study,
            package,
            config,
        }
    }

    /// Generate `RESU_COUPLING`, the coupling runcase and its batch wrapper.
    pub fn create(&self, repbase: &Path) -> Result<()> {
        if self.study.verbosity > Verbosity::Quiet {
            println!("  o Creating coupling features ...");
        }
        tracing::debug!("Generating coupling structure in {}", repbase.display());

        let records = domain_records(self.study, &self.package.code_name);
        let dict_str = serialize_domains(&records);

        // The Code_Aster path may already have created the shared results
        // directory.
        fs::create_dir_all(repbase.join("RESU_COUPLING"))?;

        let template_path = self.package.pkgdatadir().join("runcase_coupling");
        let text = fs::read_to_string(&template_path).map_err(|e| ScaffoldError::RequiredCopy {
            what: "runcase_coupling script".to_string(),
            path: template_path.clone(),
            source: e,
        })?;

        let repbase_str = repbase.display().to_string();
        let mut rendered = template::render_str(
            &text,
            &[
                ("CASEDIRNAME", repbase_str.as_str()),
                ("APP_DICTS", dict_str.as_str()),
            ],
        );

        if let Some(line) = syrthes_path_line(self.config) {
            rendered = insert_after_line_prefix(&rendered, "sys.path.insert", &line);
        }

        let runcase = repbase.join("runcase_coupling");
        template::write_executable(&runcase, &rendered)?;

        BatchFileBuilder::new(self.study, self.package, self.config).build(
            repbase,
            "coupling",
            Some("runcase_coupling"),
        )
    }
}
