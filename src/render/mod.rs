//! Turns a [`SystemSnapshot`] into printable text sections.
//!
//! Rendering is pure: it never queries the host, so the same snapshot always
//! produces the same lines.

pub mod table;

use std::io::{self, Write};

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::format::format_percent;
use crate::system::snapshot::{
    CpuInfo, DiskInfo, GpuDevice, MemoryInfo, NetworkInfo, OsInfo, Outcome, SwapInfo,
    SystemSnapshot,
};
use table::{Align, Table};

const NOT_AVAILABLE: &str = "N/A";
const NO_VALUE: &str = "-";

const DISK_COLUMNS: [(&str, Align); 7] = [
    ("device", Align::Left),
    ("mountpoint", Align::Left),
    ("fstype", Align::Left),
    ("total", Align::Right),
    ("used", Align::Right),
    ("free", Align::Right),
    ("percentage", Align::Right),
];

const GPU_COLUMNS: [(&str, Align); 8] = [
    ("id", Align::Right),
    ("name", Align::Left),
    ("load", Align::Right),
    ("free memory", Align::Right),
    ("used memory", Align::Right),
    ("total memory", Align::Right),
    ("temperature", Align::Right),
    ("uuid", Align::Left),
];

/// Banner layout.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub separator: char,
    /// Rule length for the short host sections (OS, CPU, RAM, swap).
    pub narrow_rule: usize,
    /// Rule length for the tabular sections (disk, GPU, network).
    pub wide_rule: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            separator: '=',
            narrow_rule: 20,
            wide_rule: 40,
        }
    }
}

/// One titled block of report output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub banner: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn to_lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.banner.as_str()).chain(self.lines.iter().map(String::as_str))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    Narrow,
    Wide,
}

#[derive(Clone, Debug, Default)]
pub struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Renderer { style }
    }

    /// Sections in report order. Skipped sections are left out.
    pub fn render(&self, snapshot: &SystemSnapshot) -> Vec<Section> {
        let mut sections = Vec::new();
        self.push(&mut sections, "System Information", Rule::Narrow, &snapshot.os, os_lines);
        self.push(&mut sections, "CPU Info", Rule::Narrow, &snapshot.cpu, cpu_lines);
        self.push(&mut sections, "RAM Information", Rule::Narrow, &snapshot.memory, memory_lines);
        self.push(&mut sections, "SWAP", Rule::Narrow, &snapshot.swap, swap_lines);
        self.push(&mut sections, "Disk Information", Rule::Wide, &snapshot.disk, disk_lines);
        self.push(&mut sections, "GPU Details", Rule::Wide, &snapshot.gpus, |gpus| {
            gpu_lines(gpus)
        });
        self.push(
            &mut sections,
            "Network Information",
            Rule::Wide,
            &snapshot.network,
            network_lines,
        );
        sections
    }

    fn push<T>(
        &self,
        sections: &mut Vec<Section>,
        title: &'static str,
        rule: Rule,
        outcome: &Outcome<T>,
        lines: impl FnOnce(&T) -> Vec<String>,
    ) {
        let lines = match outcome {
            Outcome::Collected(value) => lines(value),
            Outcome::Unavailable(reason) => vec![format!("Unavailable: {reason}")],
            Outcome::Skipped => return,
        };
        sections.push(Section {
            title,
            banner: self.banner(title, rule),
            lines,
        });
    }

    fn banner(&self, title: &str, rule: Rule) -> String {
        let width = match rule {
            Rule::Narrow => self.style.narrow_rule,
            Rule::Wide => self.style.wide_rule,
        };
        let rule = self.style.separator.to_string().repeat(width);
        format!("{rule} {title} {rule}")
    }
}

/// Write sections to a console-like sink, one line per row.
pub fn write_text<W: Write>(out: &mut W, sections: &[Section]) -> io::Result<()> {
    for section in sections {
        for line in section.to_lines() {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn os_lines(os: &OsInfo) -> Vec<String> {
    vec![
        format!("OperatingSystem: {} {} ({})", os.system, os.release, os.version),
        format!("MachineName: {}", os.host_name),
        format!("CPU: {},{}", os.machine, os.processor),
        format!(
            "BootTime: {}",
            os.boot_time
                .as_ref()
                .map(format_boot_time)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
    ]
}

fn format_boot_time(t: &NaiveDateTime) -> String {
    format!(
        "{}/{}/{} {}:{}:{}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

fn format_mhz(mhz: Option<f64>) -> String {
    mhz.map(|v| format!("{v:.2}Mhz"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn cpu_lines(cpu: &CpuInfo) -> Vec<String> {
    let mut lines = vec![
        format!(
            "PhysicalCores: {}",
            cpu.physical_cores
                .map(|n| n.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
        format!("TotalCores: {}", cpu.logical_cores),
        format!("MaxFrequency: {}", format_mhz(cpu.frequency.max_mhz)),
        format!("MinFrequency: {}", format_mhz(cpu.frequency.min_mhz)),
        format!(
            "CurrentFrequency: {}",
            format_mhz(Some(cpu.frequency.current_mhz))
        ),
        "CPU Usage Per Core:".to_string(),
    ];
    lines.extend(
        cpu.per_core
            .iter()
            .map(|core| format!("Core {}: {:.1}%", core.index, core.percent)),
    );
    lines.push(format!("Total CPU Usage: {:.1}%", cpu.total_percent));
    lines
}

fn memory_lines(memory: &MemoryInfo) -> Vec<String> {
    vec![
        format!("Total: {}", memory.total),
        format!("Used: {}", memory.used),
        format!("Available: {}", memory.available),
        format!("Percentage: {}", format_percent(memory.percent)),
    ]
}

fn swap_lines(swap: &SwapInfo) -> Vec<String> {
    vec![
        format!("Total: {}", swap.total),
        format!("Free: {}", swap.free),
        format!("Used: {}", swap.used),
        format!("Percentage: {}", format_percent(swap.percent)),
    ]
}

fn disk_lines(disk: &DiskInfo) -> Vec<String> {
    let mut table = Table::new(&DISK_COLUMNS);
    for partition in &disk.partitions {
        let mut row = vec![
            partition.device.clone(),
            partition.mountpoint.clone(),
            partition.fstype.clone(),
        ];
        match &partition.usage {
            Some(usage) => row.extend([
                usage.total.to_string(),
                usage.used.to_string(),
                usage.free.to_string(),
                format_percent(usage.percent),
            ]),
            None => row.extend(std::iter::repeat_n(NO_VALUE.to_string(), 4)),
        }
        table.push_row(row);
    }

    let mut lines = vec!["Partitions and Usage:".to_string()];
    lines.extend(table.render());
    if let Some(io) = &disk.io {
        lines.push(format!("Total read: {}", io.read_bytes));
        lines.push(format!("Total write: {}", io.write_bytes));
    }
    lines
}

fn gpu_lines(gpus: &[GpuDevice]) -> Vec<String> {
    let mut table = Table::new(&GPU_COLUMNS);
    for gpu in gpus {
        table.push_row(vec![
            gpu.id.to_string(),
            gpu.name.clone(),
            gpu.load
                .map(|load| format_percent(load * 100.0))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            gpu.memory_free.to_string(),
            gpu.memory_used.to_string(),
            gpu.memory_total.to_string(),
            gpu.temperature_c
                .map(|t| format!("{t:.1} °C"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            gpu.uuid.clone(),
        ]);
    }
    table.render()
}

fn network_lines(network: &NetworkInfo) -> Vec<String> {
    let mut lines = Vec::new();
    for iface in &network.interfaces {
        lines.push(format!("=== Interface: {} ===", iface.name));
        if let Some(mac) = &iface.mac_address {
            lines.push(format!("  MAC Address: {mac}"));
        }
        for entry in &iface.addresses {
            lines.push(format!("  IP Address: {}/{}", entry.addr, entry.prefix));
        }
    }
    lines.push(format!("Total Bytes Sent: {}", network.bytes_sent));
    lines.push(format!("Total Bytes Received: {}", network.bytes_received));
    lines
}
