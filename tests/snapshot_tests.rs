use chrono::NaiveDate;
use hostsnap::render::{Renderer, write_text};
use hostsnap::system::assembler::{Sections, SnapshotAssembler};
use hostsnap::system::fake::{FakeGpu, FakeHost};
use hostsnap::system::snapshot::{Outcome, SystemSnapshot};
use insta::assert_snapshot;

fn assemble(host: &mut FakeHost, gpu: &mut FakeGpu, sections: Sections) -> SystemSnapshot {
    let mut snapshot = SnapshotAssembler::new(host, gpu, sections).assemble();
    // Boot time is converted to local time; pin it for stable output.
    if let Outcome::Collected(os) = &mut snapshot.os {
        os.boot_time = NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(7, 8, 9));
    }
    snapshot
}

fn render_text(snapshot: &SystemSnapshot) -> String {
    let sections = Renderer::default().render(snapshot);
    let mut out = Vec::new();
    write_text(&mut out, &sections).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn full_report_from_fake_host() {
    let mut host = FakeHost::default();
    let mut gpu = FakeGpu::with_one_device();
    let sections = Sections {
        network: true,
        ..Sections::default()
    };
    let snapshot = assemble(&mut host, &mut gpu, sections);
    let report = render_text(&snapshot);

    assert_snapshot!("full_report", report);
}

#[test]
fn memory_total_line_from_fixed_reading() {
    let mut host = FakeHost::default();
    host.memory.total = 8_589_934_592;
    let mut gpu = FakeGpu::default();
    let report = render_text(&assemble(&mut host, &mut gpu, Sections::default()));
    assert!(report.lines().any(|line| line == "Total: 8.00GB"));
}

#[test]
fn zero_gpus_still_render_a_section() {
    let mut host = FakeHost::default();
    let mut gpu = FakeGpu::without_driver();
    let report = render_text(&assemble(&mut host, &mut gpu, Sections::default()));

    let lines: Vec<&str> = report.lines().collect();
    let banner = lines
        .iter()
        .position(|line| line.contains(" GPU Details "))
        .expect("missing GPU banner");
    assert!(lines[banner + 1].starts_with("id  name"));
    assert!(lines[banner + 2].starts_with("--"));
    // GPU is the last enabled section, so nothing follows the rule.
    assert_eq!(lines.len(), banner + 3);
}

#[test]
fn failed_sections_do_not_hide_the_rest() {
    let mut host = FakeHost::default();
    host.unavailable.extend(["cpu", "disk"]);
    let mut gpu = FakeGpu::default();
    let report = render_text(&assemble(&mut host, &mut gpu, Sections::default()));

    assert!(report.contains("Unavailable: cpu unavailable: fake source offline"));
    assert!(report.contains("Unavailable: disk unavailable: fake source offline"));
    assert!(report.contains("Total: 8.00GB"));
    assert!(report.contains(" SWAP "));
}

#[test]
fn disabled_sections_are_omitted() {
    let mut host = FakeHost::default();
    let mut gpu = FakeGpu::with_one_device();
    let sections = Sections {
        swap: false,
        gpu: false,
        ..Sections::default()
    };
    let report = render_text(&assemble(&mut host, &mut gpu, sections));
    assert!(!report.contains(" SWAP "));
    assert!(!report.contains(" GPU Details "));
    assert!(!report.contains(" Network Information "));
    assert!(report.contains(" Disk Information "));
}

#[test]
fn json_output_round_trips_section_status() {
    let mut host = FakeHost::default();
    host.unavailable.push("swap");
    let mut gpu = FakeGpu::with_one_device();
    let snapshot = assemble(&mut host, &mut gpu, Sections::default());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["memory"]["status"], "collected");
    assert_eq!(json["memory"]["data"]["total"], 8_589_934_592u64);
    assert_eq!(json["swap"]["status"], "unavailable");
    assert_eq!(json["network"]["status"], "skipped");
    assert_eq!(json["gpus"]["data"][0]["uuid"], "GPU-1234abcd");
    assert!(json["disk"]["data"]["partitions"][1]["usage"].is_null());
}
