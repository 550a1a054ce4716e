use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use study_gen::{
    CaseFactory, InstallConfig, Package, ScaffoldError, Study, StudyBuilder, SyrthesCaseFactory,
    Verbosity,
};
use tempfile::TempDir;

const COUPLING_TEMPLATE: &str = "#!/usr/bin/env python\n\
import sys\n\
sys.path.insert(0, 'CASEDIRNAME')\n\
casedir = 'CASEDIRNAME'\n\
domains = [APP_DICTS]\n";

const ASTER_TEMPLATE: &str = "#!/usr/bin/env python\n\
casedir = 'CASEDIRNAME'\n\
fluid = 'CASENAME'\n\
aster = 'ASTERNAME'\n\
study = 'STUDYNAME'\n\
asterhome = 'ASTERHOME'\n";

fn test_package(root: &Path) -> Package {
    let package = Package::with_prefix(root.join("prefix"));
    let datadir = package.pkgdatadir();
    fs::create_dir_all(datadir.join("data").join("thch")).unwrap();
    fs::create_dir_all(datadir.join("user")).unwrap();
    fs::create_dir_all(datadir.join("user_examples")).unwrap();
    fs::write(datadir.join("calypso_user_scripts.py"), "# scripts\n").unwrap();
    fs::write(datadir.join("runcase_coupling"), COUPLING_TEMPLATE).unwrap();
    fs::write(datadir.join("runcase_aster"), ASTER_TEMPLATE).unwrap();
    fs::create_dir_all(datadir.join("salome")).unwrap();
    fs::write(datadir.join("salome").join("fsi.export"), "export").unwrap();
    package
}

fn study(cases: &[&str], syr: &[&str], aster: Option<&str>) -> Study {
    Study {
        name: "S".to_string(),
        cases: cases.iter().map(|s| s.to_string()).collect(),
        syr_case_names: syr.iter().map(|s| s.to_string()).collect(),
        ast_case_name: aster.map(|s| s.to_string()),
        copy_from: None,
        use_ref: true,
        verbosity: Verbosity::Quiet,
    }
}

/// Records delegated case creations instead of running the real SYRTHES
/// tooling.
#[derive(Clone, Default)]
struct MockSyrthesFactory {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CaseFactory for MockSyrthesFactory {
    fn create_case(&self, _install: &Path, base: &Path, name: &str) -> study_gen::Result<()> {
        fs::create_dir(base.join(name))?;
        self.calls.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

#[test]
fn test_two_primary_cases_produce_two_entry_descriptor() {
    let tmp = TempDir::new().unwrap();
    let package = test_package(tmp.path());
    let config = InstallConfig::from_ini_str("").unwrap();

    let builder = StudyBuilder::new(
        study(&["A", "B"], &[], None),
        package,
        config,
        SyrthesCaseFactory,
    );
    let repbase = builder.create_in(tmp.path()).unwrap();

    let script = fs::read_to_string(repbase.join("runcase_coupling")).unwrap();

    // absolute study path substituted everywhere
    assert!(script.contains(&format!("casedir = '{}'", repbase.display())));
    assert!(!script.contains("CASEDIRNAME"));
    assert!(!script.contains("APP_DICTS"));

    // one record per domain, primary solver only, CLI order
    assert_eq!(script.matches("'solver': 'Calypso'").count(), 2);
    assert!(!script.contains("'solver': 'SYRTHES'"));
    let a = script.find("'domain': 'A'").unwrap();
    let b = script.find("'domain': 'B'").unwrap();
    assert!(a < b);

    // batch wrapper for the coupled run
    let batch = fs::read_to_string(repbase.join("runcase_batch")).unwrap();
    assert!(batch.contains("./runcase_coupling"));
}

#[test]
fn test_syrthes_case_joins_the_coupling() {
    let tmp = TempDir::new().unwrap();
    let package = test_package(tmp.path());
    let config = InstallConfig::from_ini_str("[install]\nsyrthes = /opt/syrthes4\n").unwrap();
    let factory = MockSyrthesFactory::default();

    let builder = StudyBuilder::new(
        study(&["FLUID"], &["SOLID"], None),
        package,
        config,
        factory.clone(),
    );
    let repbase = builder.create_in(tmp.path()).unwrap();

    // delegated to the SYRTHES tooling
    assert_eq!(*factory.calls.lock().unwrap(), vec!["SOLID".to_string()]);
    assert!(repbase.join("SOLID").is_dir());

    let script = fs::read_to_string(repbase.join("runcase_coupling")).unwrap();
    let fluid = script.find("'domain': 'FLUID'").unwrap();
    let solid = script.find("'domain': 'SOLID'").unwrap();
    assert!(fluid < solid);
    assert!(script.contains("'solver': 'SYRTHES'"));
    assert!(script.contains("'script': 'syrthes_data.syd'"));
    assert!(script.contains("'opt' : ''"));

    // import line inserted right after the template's own sys.path.insert
    let expected = "sys.path.insert(0, '";
    let inserted = "sys.path.insert(1, '/opt/syrthes4/share/syrthes')\n";
    let first = script.find(expected).unwrap();
    let second = script.find(inserted).unwrap();
    assert!(first < second);
}

#[test]
fn test_syrthes_without_installation_fails_before_creating_cases() {
    let tmp = TempDir::new().unwrap();
    let package = test_package(tmp.path());
    let config = InstallConfig::from_ini_str("").unwrap();
    let factory = MockSyrthesFactory::default();

    let builder = StudyBuilder::new(
        study(&["FLUID"], &["SOLID"], None),
        package,
        config,
        factory.clone(),
    );
    let result = builder.create_in(tmp.path());

    let err = result.unwrap_err();
    assert!(matches!(err, ScaffoldError::MissingInstallation { .. }));
    assert_eq!(err.exit_code(), 1);

    // the factory was never reached and no SYRTHES files exist
    assert!(factory.calls.lock().unwrap().is_empty());
    assert!(!tmp.path().join("S").join("SOLID").exists());
}

#[test]
fn test_aster_case_creation() {
    let tmp = TempDir::new().unwrap();
    let package = test_package(tmp.path());
    let config = InstallConfig::from_ini_str("[install]\naster = /opt/aster\n").unwrap();

    let builder = StudyBuilder::new(
        study(&["FLUID"], &[], Some("STRUCT")),
        package,
        config,
        SyrthesCaseFactory,
    );
    let repbase = builder.create_in(tmp.path()).unwrap();

    assert!(repbase.join("STRUCT").is_dir());
    assert!(repbase.join("STRUCT").join("fsi.export").is_file());
    assert!(repbase.join("RESU_COUPLING").is_dir());

    let script = fs::read_to_string(repbase.join("runcase_coupling")).unwrap();
    assert!(script.contains(&format!("casedir = '{}'", repbase.display())));
    assert!(script.contains("fluid = 'FLUID'"));
    assert!(script.contains("aster = 'STRUCT'"));
    assert!(script.contains("study = 'S'"));
    assert!(script.contains("asterhome = '/opt/aster'"));
}

#[test]
fn test_aster_without_installation_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let package = test_package(tmp.path());
    let config = InstallConfig::from_ini_str("").unwrap();

    let builder = StudyBuilder::new(
        study(&["FLUID"], &[], Some("STRUCT")),
        package,
        config,
        SyrthesCaseFactory,
    );
    let result = builder.create_in(tmp.path());

    let err = result.unwrap_err();
    assert!(matches!(err, ScaffoldError::MissingInstallation { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!tmp.path().join("S").join("STRUCT").exists());
    assert!(!tmp.path().join("S").join("RESU_COUPLING").exists());
}
