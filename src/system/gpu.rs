use std::io;
use std::process::Command;

use tracing::{debug, warn};

use super::collector::{CollectionError, Collector};
use super::snapshot::{ByteSize, GpuDevice};

const QUERY_FIELDS: &str =
    "index,uuid,utilization.gpu,memory.total,memory.used,memory.free,name,temperature.gpu";

/// One device as the driver reports it. Memory in MiB, utilization in
/// percent. `None` where the driver printed `[N/A]` or similar.
#[derive(Clone, Debug, PartialEq)]
pub struct RawGpu {
    pub index: u32,
    pub uuid: String,
    pub name: String,
    pub utilization_percent: Option<f64>,
    pub memory_total_mib: Option<u64>,
    pub memory_used_mib: Option<u64>,
    pub memory_free_mib: Option<u64>,
    pub temperature_c: Option<f64>,
}

/// GPU driver collaborator.
pub trait GpuSource {
    /// `SourceUnavailable` when there is no driver to ask.
    fn devices(&mut self) -> Result<Vec<RawGpu>, CollectionError>;
}

/// Queries NVIDIA GPUs through the `nvidia-smi` CLI.
pub struct NvidiaSmi {
    program: String,
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self::new("nvidia-smi")
    }
}

impl NvidiaSmi {
    pub fn new(program: impl Into<String>) -> Self {
        NvidiaSmi {
            program: program.into(),
        }
    }
}

impl GpuSource for NvidiaSmi {
    fn devices(&mut self) -> Result<Vec<RawGpu>, CollectionError> {
        let output = Command::new(&self.program)
            .arg(format!("--query-gpu={QUERY_FIELDS}"))
            .arg("--format=csv,noheader,nounits")
            .output()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => {
                    CollectionError::unavailable("gpu driver", format!("{} not found", self.program))
                }
                _ => CollectionError::unavailable("gpu driver", err.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollectionError::unavailable(
                "gpu driver",
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        Ok(parse_query_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `--format=csv,noheader,nounits` rows. Malformed rows are dropped
/// with a warning; the others are kept.
pub fn parse_query_output(stdout: &str) -> Vec<RawGpu> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_row(line) {
            Some(gpu) => Some(gpu),
            None => {
                warn!(row = line, "skipping unparsable nvidia-smi row");
                None
            }
        })
        .collect()
}

fn parse_row(line: &str) -> Option<RawGpu> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 8 {
        return None;
    }
    // Only the name column may itself contain commas.
    let last = fields.len() - 1;
    Some(RawGpu {
        index: fields[0].trim().parse().ok()?,
        uuid: fields[1].trim().to_string(),
        utilization_percent: parse_number(fields[2]),
        memory_total_mib: parse_mib(fields[3]),
        memory_used_mib: parse_mib(fields[4]),
        memory_free_mib: parse_mib(fields[5]),
        name: fields[6..last].join(",").trim().to_string(),
        temperature_c: parse_number(fields[last]),
    })
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_mib(field: &str) -> Option<u64> {
    parse_number(field)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

pub struct GpuCollector<'a> {
    source: &'a mut dyn GpuSource,
}

impl<'a> GpuCollector<'a> {
    pub fn new(source: &'a mut dyn GpuSource) -> Self {
        GpuCollector { source }
    }
}

impl Collector for GpuCollector<'_> {
    type Output = Vec<GpuDevice>;

    fn name(&self) -> &'static str {
        "gpu"
    }

    fn collect(&mut self) -> Result<Vec<GpuDevice>, CollectionError> {
        let raw = match self.source.devices() {
            Ok(raw) => raw,
            Err(err @ CollectionError::SourceUnavailable { .. }) => {
                debug!(error = %err, "no gpu driver, reporting zero devices");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        Ok(raw.into_iter().map(device_from_raw).collect())
    }
}

fn device_from_raw(raw: RawGpu) -> GpuDevice {
    GpuDevice {
        id: raw.index,
        name: raw.name,
        load: raw
            .utilization_percent
            .map(|percent| (percent / 100.0).clamp(0.0, 1.0)),
        memory_free: ByteSize::from_mib(raw.memory_free_mib.unwrap_or(0)),
        memory_used: ByteSize::from_mib(raw.memory_used_mib.unwrap_or(0)),
        memory_total: ByteSize::from_mib(raw.memory_total_mib.unwrap_or(0)),
        temperature_c: raw.temperature_c,
        uuid: raw.uuid,
    }
}
