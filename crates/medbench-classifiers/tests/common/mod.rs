//! Small synthetic copies of the four dataset layouts.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `id,diagnosis,f1,f2,f3`; malignant rows sit far from benign ones.
pub fn breast_cancer_rows(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let malignant = i % 3 == 0;
        let base = if malignant { 20.0 } else { 12.0 };
        let jitter = (i % 7) as f64 * 0.1;
        out.push_str(&format!(
            "{},{},{:.2},{:.2},{:.2}\n",
            i + 1,
            if malignant { "M" } else { "B" },
            base + jitter,
            base * 0.5 - jitter,
            if malignant { 1.0 } else { 0.2 } + jitter * 0.01,
        ));
    }
    out
}

/// `age,sex,on_thyroxine,referral,label` with a `.|id` label suffix and
/// three diagnosis classes.
pub fn hyperthyroid_rows(start: usize, n: usize) -> String {
    let classes = ["negative", "hyperthyroid", "T3 toxic"];
    let referrals = ["SVHC", "other", "SVI"];
    let mut out = String::new();
    for i in start..start + n {
        let class = i % 3;
        let sex = match i % 5 {
            0 => "?",
            1 | 3 => "F",
            _ => "M",
        };
        out.push_str(&format!(
            "{},{},{},{},{}.|{}\n",
            20 + class * 25 + i % 4,
            sex,
            if i % 2 == 0 { "f" } else { "t" },
            referrals[class],
            classes[class],
            1000 + i,
        ));
    }
    out
}

/// Header-bearing layout with the leakage columns present and `?` cells,
/// including one row with every feature missing.
pub fn cervical_rows(n: usize) -> String {
    let mut out = String::from(
        "Age,Smokes,Number of sexual partners,Dx:Cancer,Dx:CIN,Dx:HPV,Dx,Hinselmann,Schiller,Citology,Biopsy\n",
    );
    for i in 0..n {
        if i == 4 {
            out.push_str("?,?,?,?,?,?,?,?,?,?,0\n");
            continue;
        }
        let biopsy = usize::from(i % 4 == 0);
        let smokes = if i % 6 == 5 { "?".to_string() } else { (i % 2).to_string() };
        out.push_str(&format!(
            "{},{},{},{},0,0,{},{},{},0,{}\n",
            18 + biopsy * 20 + i % 5,
            smokes,
            1 + biopsy * 4 + i % 3,
            biopsy,
            biopsy,
            biopsy,
            biopsy,
            biopsy,
        ));
    }
    out
}

/// `age,gender,bilirubin,albumin_ratio,selector` with `?` in the last
/// feature.
pub fn liver_rows(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let selector: usize = if i % 3 == 0 { 2 } else { 1 };
        let ratio = if i % 8 == 3 {
            "?".to_string()
        } else {
            format!("{:.2}", 0.6 + (selector as f64) * 0.3 + (i % 4) as f64 * 0.02)
        };
        out.push_str(&format!(
            "{},{},{:.1},{},{}\n",
            30 + selector * 15 + i % 6,
            if i % 2 == 0 { "Female" } else { "Male" },
            0.7 + (2 - selector) as f64 * 3.0 + (i % 5) as f64 * 0.1,
            ratio,
            selector,
        ));
    }
    out
}

/// A data directory holding all four datasets.
pub fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "breast_cancer/wdbc.data", &breast_cancer_rows(40));
    write(dir.path(), "hyperthyroidism/allhyper.data", &hyperthyroid_rows(0, 24));
    write(dir.path(), "hyperthyroidism/allhyper.test", &hyperthyroid_rows(24, 12));
    write(
        dir.path(),
        "cervical_cancer/risk_factors_cervical_cancer.csv",
        &cervical_rows(32),
    );
    write(dir.path(), "liver_cancer/ilpd.csv", &liver_rows(36));
    dir
}
