use std::process::Command;

fn nn_trainer() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nn-trainer"))
}

#[test]
fn lists_datasets() {
    let out = nn_trainer().arg("datasets").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    for name in ["and", "or", "xor", "x1", "x2"] {
        assert!(stdout.lines().any(|l| l.starts_with(name)), "missing {name}");
    }
}

#[test]
fn train_prints_json_report() {
    let out = nn_trainer()
        .args([
            "train", "--dataset", "xor", "--hidden", "4", "--stdev", "0.5", "--learning-rate", "0.5",
            "--epochs", "20", "--seed", "3", "--json",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["dataset"], "xor");
    assert_eq!(report["history"].as_array().unwrap().len(), 20);
    assert_eq!(report["predictions"].as_array().unwrap().len(), 4);
    assert_eq!(report["model"]["layers"][0]["output_dim"], 4);
}

#[test]
fn forward_prints_every_layer() {
    let out = nn_trainer()
        .args(["forward", "--hidden", "3", "--epochs", "5", "--seed", "1", "--input", "1,0", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let pass: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let layers = pass["activations"].as_array().unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[1].as_array().unwrap().len(), 3);
}

#[test]
fn rejects_out_of_range_learning_rate() {
    let out = nn_trainer()
        .args(["train", "--learning-rate", "3.0", "--epochs", "1"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("learning_rate"));
}

#[test]
fn rejects_unknown_dataset() {
    let out = nn_trainer().args(["train", "--dataset", "nand"]).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8(out.stderr).unwrap().contains("nand"));
}
