//! Integration tests for the provisioning public API.

use mlenv::config::{parse_config, validate, PinnedPackage, ProvisionConfig};
use mlenv::provision::{build_plan, is_confirmed, Step};
use std::path::Path;

#[test]
fn public_api_is_accessible() {
    let _config = ProvisionConfig::default();
    let _pin = PinnedPackage::new("tensorflow-cpu", "2.10.0");
    let _step = Step::SmokeTest;
}

#[test]
fn plan_from_yaml() {
    let config = parse_config(
        r#"
env_name: cv
display_name: "Python (cv)"
python_version: "3.9"
vision_packages: [opencv-python]
numerics:
  package: tensorflow-cpu
  version: "2.10.1"
"#,
        Path::new("mlenv.yml"),
    )
    .unwrap();
    validate(&config).unwrap();

    let plan = build_plan(&config, Path::new("/opt/conda/bin/conda"));
    let lines: Vec<String> = plan.enabled().map(|p| p.command.to_string()).collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains("--name cv python=3.9"));
    assert!(lines[2].ends_with("-m pip install opencv-python"));
    assert!(lines[3].contains("tensorflow-cpu==2.10.1 tensorflow-directml-plugin==0.4.0.dev230202"));
    assert!(lines[4].contains("--display-name \"Python (cv)\""));
}

#[test]
fn pins_match_config_exactly() {
    let config = ProvisionConfig {
        numerics: PinnedPackage::new("tensorflow-cpu", "2.10.0"),
        accelerator: PinnedPackage::new("tensorflow-directml-plugin", "0.4.0.dev230202"),
        ..Default::default()
    };
    let plan = build_plan(&config, Path::new("conda"));
    let reinstall = &plan.get(Step::InstallNumerics).unwrap().command;

    assert!(reinstall.has_args(&[
        "--force-reinstall",
        "--no-cache-dir",
        "tensorflow-cpu==2.10.0",
        "tensorflow-directml-plugin==0.4.0.dev230202",
    ]));
}

#[test]
fn vision_disabled_omits_vision_packages() {
    let config = ProvisionConfig {
        install_vision: false,
        ..Default::default()
    };
    let plan = build_plan(&config, Path::new("conda"));

    for planned in plan.enabled() {
        for package in &config.vision_packages {
            assert!(!planned.command.has_arg(package));
        }
    }
}

#[test]
fn confirmation_is_exact() {
    assert!(is_confirmed("SI", "SI"));
    for answer in ["si", "Si", " SI", "SI ", "", "yes"] {
        assert!(!is_confirmed(answer, "SI"), "{answer:?} should decline");
    }
}

#[cfg(unix)]
mod workflow {
    use mlenv::config::ProvisionConfig;
    use mlenv::locator::{LocateStrategy, ToolLocator};
    use mlenv::provision::{ProvisionOptions, ProvisionOutcome, Provisioner, Step, StepStatus};
    use mlenv::shell::{OsFamily, RecordingRunner};
    use mlenv::ui::MockUI;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn candidate_conda() -> (TempDir, ToolLocator) {
        let temp = TempDir::new().unwrap();
        let conda = temp.path().join("miniconda3").join("bin").join("conda");
        fs::create_dir_all(conda.parent().unwrap()).unwrap();
        fs::write(&conda, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&conda, fs::Permissions::from_mode(0o755)).unwrap();

        let locator = ToolLocator::new("conda", vec!["conda".to_string()])
            .with_strategy(LocateStrategy::SearchPath(vec![]))
            .with_strategy(LocateStrategy::Candidates(vec![conda]));
        (temp, locator)
    }

    fn confirmed() -> ProvisionOptions {
        ProvisionOptions {
            confirm_answer: Some("SI".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn end_to_end_invocation_order() {
        let (temp, locator) = candidate_conda();
        let config = ProvisionConfig::default();
        let mut runner = RecordingRunner::new();
        let mut ui = MockUI::new();

        let outcome = Provisioner::new(&config, &mut runner)
            .with_host(OsFamily::Windows)
            .with_locator(locator)
            .with_options(confirmed())
            .run(&mut ui)
            .unwrap();

        let report = match outcome {
            ProvisionOutcome::Completed(report) => report,
            other => panic!("expected completion, got {other:?}"),
        };
        assert!(report.conda.starts_with(temp.path()));
        assert_eq!(report.status(Step::SmokeTest), Some(StepStatus::Completed));

        let commands = runner.commands();
        assert_eq!(commands.len(), 6);
        assert!(commands[0].has_args(&["create", "--yes", "--name", "ml-directml"]));
        assert!(commands[1].has_args(&["-m", "pip", "install", "--upgrade", "pip"]));
        assert!(commands[2].has_arg("ultralytics"));
        assert!(commands[3].has_args(&["--force-reinstall", "--no-cache-dir"]));
        assert!(commands[4].has_args(&["-m", "ipykernel", "install", "--user"]));
        assert!(commands[5].has_arg("-c"));
        for spec in commands {
            assert!(spec.program.starts_with(temp.path()));
        }
    }

    #[test]
    fn existing_environment_is_tolerated() {
        let (_temp, locator) = candidate_conda();
        let config = ProvisionConfig::default();
        let mut runner = RecordingRunner::new();
        runner.fail_on(&["create"], Some(1));
        let mut ui = MockUI::new();

        let outcome = Provisioner::new(&config, &mut runner)
            .with_host(OsFamily::Windows)
            .with_locator(locator)
            .with_options(confirmed())
            .run(&mut ui)
            .unwrap();

        match outcome {
            ProvisionOutcome::Completed(report) => assert_eq!(
                report.status(Step::CreateEnvironment),
                Some(StepStatus::Tolerated)
            ),
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(runner.commands().len(), 6);
    }

    #[test]
    fn failed_reinstall_stops_before_kernel() {
        let (_temp, locator) = candidate_conda();
        let config = ProvisionConfig::default();
        let mut runner = RecordingRunner::new();
        runner.fail_on(&["--force-reinstall"], Some(1));
        let mut ui = MockUI::new();

        let result = Provisioner::new(&config, &mut runner)
            .with_host(OsFamily::Windows)
            .with_locator(locator)
            .with_options(confirmed())
            .run(&mut ui);

        assert!(result.is_err());
        assert_eq!(runner.commands().len(), 4);
        assert!(!runner
            .commands()
            .iter()
            .any(|c| c.has_args(&["-m", "ipykernel"])));
    }
}
