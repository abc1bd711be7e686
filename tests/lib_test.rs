//! Library integration tests.

use ipydeps::IpydepsError;

#[test]
fn error_types_are_public() {
    let err = IpydepsError::PipConfigNotFound {
        name: "internal".into(),
        path: "/etc/ipydeps/internal".into(),
    };
    assert!(err.to_string().contains("internal"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> ipydeps::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use ipydeps::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["ipydeps", "overrides", "GDAL", "--json"]);

    if let Commands::Overrides(args) = cli.command {
        assert_eq!(args.packages, vec!["GDAL"]);
        assert!(args.json);
    } else {
        panic!("Expected Overrides command");
    }
}

#[test]
fn install_options_default_to_overrides_on() {
    let options = ipydeps::InstallOptions::default();
    assert!(options.use_overrides);
    assert!(!options.use_pki);
    assert!(options.pip_config.is_none());
}

#[test]
fn package_helpers_are_public() {
    use ipydeps::packages::{get_pkg_names, subtract_stdlib, PackageRequest};

    let names = get_pkg_names(&PackageRequest::from(vec!["numpy", "os", "not a valid!!pkg"]));
    let expected: Vec<&str> = vec!["numpy", "os"];
    assert_eq!(names.iter().map(String::as_str).collect::<Vec<_>>(), expected);

    let remaining = subtract_stdlib(&names);
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains("numpy"));
}

#[test]
fn python_version_tags() {
    let version: ipydeps::python::PythonVersion = "Python 3.11.4".parse().unwrap();
    assert_eq!(
        version.tags(),
        ["python-3".to_string(), "python-3.11".to_string(), "python-3.11.4".to_string()]
    );
}
