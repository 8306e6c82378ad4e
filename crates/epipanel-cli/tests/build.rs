//! End-to-end build from local CSV files.

use std::fs;
use std::path::Path;

use epipanel_cli::commands::{run_aliases, run_build};
use epipanel_cli::types::BuildRequest;
use epipanel_ingest::SourceSet;
use epipanel_model::DataQualityWarning;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

fn write_sources(dir: &Path) {
    write(
        dir,
        "cases.csv",
        "Province/State,Country/Region,Lat,Long,1/1/21,1/2/21\n\
         ,US,40.0,-100.0,10,15\n\
         Ontario,Canada,51.2,-85.3,3,4\n\
         Quebec,Canada,52.9,-73.5,5,7\n",
    );
    write(
        dir,
        "deaths.csv",
        "Province/State,Country/Region,Lat,Long,1/1/21,1/2/21\n\
         ,US,40.0,-100.0,1,2\n\
         Ontario,Canada,51.2,-85.3,0,0\n\
         Quebec,Canada,52.9,-73.5,1,1\n",
    );
    write(
        dir,
        "recovered.csv",
        "Province/State,Country/Region,Lat,Long,1/1/21,1/2/21\n\
         ,Canada,56.1,-106.3,2,3\n",
    );
    write(
        dir,
        "vaccinations.csv",
        "iso_code,location,date,total_vaccinations,people_fully_vaccinated,population\n\
         USA,United States,2021-01-02,100,10,1000\n\
         CAN,Canada,2021-01-01,,,38000000\n",
    );
}

fn request(data_dir: &Path, output_dir: &Path, countries: &[&str]) -> BuildRequest {
    BuildRequest {
        sources: SourceSet::from_dir(data_dir),
        countries: countries.iter().map(|s| (*s).to_string()).collect(),
        config: None,
        output_dir: output_dir.to_path_buf(),
        dry_run: false,
    }
}

#[test]
fn build_writes_outputs_and_summaries() {
    let data = tempfile::tempdir().expect("temp dir");
    let out = tempfile::tempdir().expect("temp dir");
    write_sources(data.path());

    let result = run_build(&request(data.path(), out.path(), &["US", "Canada", "Narnia"]))
        .expect("build");

    let outputs = result.outputs.as_ref().expect("outputs written");
    assert!(outputs.panel.exists());
    assert!(outputs.latest.exists());
    assert!(outputs.diagnostics.exists());

    let panel_csv = fs::read_to_string(&outputs.panel).expect("read panel");
    let mut lines = panel_csv.lines();
    assert_eq!(
        lines.next(),
        Some(
            "country,date,total_cases,total_deaths,total_recovered,new_cases,new_deaths,\
             death_rate,total_vaccinations,people_fully_vaccinated,population,\
             vaccination_rate,region_code"
        )
    );
    assert_eq!(lines.count(), 4);

    let summaries = result.country_summaries();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].canonical, "United States");
    assert_eq!(summaries[0].source_name, "US");
    assert_eq!(summaries[1].source_name, "Canada");
    assert_eq!(summaries[0].rows, 2);
    assert_eq!(summaries[0].total_cases, Some(15));
    assert_eq!(summaries[0].vaccination_rate, Some(1.0));
    assert_eq!(summaries[0].undefined_rates, 1);
    assert_eq!(summaries[1].undefined_rates, 1);
    assert_eq!(summaries[1].total_cases, Some(11));
    assert_eq!(summaries[2].rows, 0);
    assert_eq!(summaries[2].undefined_rates, 0);
    assert_eq!(summaries[2].source_name, "Narnia");
    assert!(
        result
            .diagnostics
            .warnings
            .contains(&DataQualityWarning::ZeroSelection {
                requested: "Narnia".to_string(),
                canonical: "Narnia".to_string(),
            })
    );
}

#[test]
fn dry_run_writes_nothing() {
    let data = tempfile::tempdir().expect("temp dir");
    let out = tempfile::tempdir().expect("temp dir");
    write_sources(data.path());
    let target = out.path().join("panel");

    let mut request = request(data.path(), &target, &["Canada"]);
    request.dry_run = true;
    let result = run_build(&request).expect("build");

    assert!(result.outputs.is_none());
    assert_eq!(result.panel.rows.len(), 2);
    assert!(!target.exists());
}

#[test]
fn malformed_source_fails_the_build() {
    let data = tempfile::tempdir().expect("temp dir");
    let out = tempfile::tempdir().expect("temp dir");
    write_sources(data.path());
    write(
        data.path(),
        "deaths.csv",
        "Province/State,Country/Region,Lat,Long,1/2/21,1/1/21\n,US,40.0,-100.0,1,2\n",
    );

    let err = run_build(&request(data.path(), out.path(), &["US"])).unwrap_err();
    assert!(format!("{err:#}").contains("malformed schedule"));
    assert!(!out.path().join("panel.csv").exists());
}

#[test]
fn config_supplies_selection_and_aliases() {
    let data = tempfile::tempdir().expect("temp dir");
    let out = tempfile::tempdir().expect("temp dir");
    write_sources(data.path());
    let config = data.path().join("epipanel.toml");
    write(
        data.path(),
        "epipanel.toml",
        "countries = [\"Kanada\"]\n\n[aliases]\n\"Canada\" = \"Kanada\"\n",
    );

    let mut request = request(data.path(), out.path(), &[]);
    request.config = Some(config.clone());
    let result = run_build(&request).expect("build");
    assert_eq!(result.panel.rows.len(), 2);
    assert!(result.panel.rows.iter().all(|row| row.country == "Kanada"));

    let aliases = run_aliases(Some(config.as_path())).expect("aliases");
    assert_eq!(aliases.resolve("Canada"), "Kanada");
    assert_eq!(aliases.resolve("US"), "United States");
}
