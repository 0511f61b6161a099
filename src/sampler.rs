use std::path::Path;

use sysinfo::{CpuExt, DiskExt, System, SystemExt};
use thiserror::Error;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskInfo {
    pub free_gb: f64,
    pub total_gb: f64,
    pub percent_used: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryInfo {
    pub available_gb: f64,
    pub total_gb: f64,
    pub percent_used: f32,
}

#[derive(Debug, Error, Clone)]
#[error("resource sampling failed: {0}")]
pub struct SampleError(pub String);

pub trait ResourceSampler {
    fn cpu_percent(&mut self) -> Result<f32, SampleError>;
    fn disk_info(&mut self) -> Result<DiskInfo, SampleError>;
    fn memory_info(&mut self) -> Result<MemoryInfo, SampleError>;
}

pub struct SysinfoSampler {
    system: System,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        Self {
            system: System::new_all(),
        }
    }

    // The root filesystem if present, otherwise whatever disk sysinfo lists
    // first.
    fn primary_disk(&self) -> Option<&sysinfo::Disk> {
        self.system
            .disks()
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .or_else(|| self.system.disks().first())
    }
}

impl ResourceSampler for SysinfoSampler {
    fn cpu_percent(&mut self) -> Result<f32, SampleError> {
        self.system.refresh_cpu();
        Ok(self.system.global_cpu_info().cpu_usage())
    }

    fn disk_info(&mut self) -> Result<DiskInfo, SampleError> {
        self.system.refresh_disks_list();
        self.system.refresh_disks();

        let disk = self
            .primary_disk()
            .ok_or_else(|| SampleError("no disks reported by the system".to_string()))?;

        let total = disk.total_space() as f64;
        let available = disk.available_space() as f64;
        let used = total - available;
        let percent_used = if total > 0.0 {
            (used / total * 100.0) as f32
        } else {
            0.0
        };

        Ok(DiskInfo {
            free_gb: available / BYTES_PER_GB,
            total_gb: total / BYTES_PER_GB,
            percent_used,
        })
    }

    fn memory_info(&mut self) -> Result<MemoryInfo, SampleError> {
        self.system.refresh_memory();

        let total = self.system.total_memory() as f64;
        let available = self.system.available_memory() as f64;
        let percent_used = if total > 0.0 {
            ((total - available) / total * 100.0) as f32
        } else {
            0.0
        };

        Ok(MemoryInfo {
            available_gb: available / BYTES_PER_GB,
            total_gb: total / BYTES_PER_GB,
            percent_used,
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{DiskInfo, MemoryInfo, ResourceSampler, SampleError};

    pub(crate) struct MockSampler {
        pub(crate) cpu: Result<f32, SampleError>,
        pub(crate) disk: Result<DiskInfo, SampleError>,
        pub(crate) memory: Result<MemoryInfo, SampleError>,
    }

    impl MockSampler {
        pub(crate) fn steady(cpu: f32, ram_percent: f32, disk_free_gb: f64) -> Self {
            Self {
                cpu: Ok(cpu),
                disk: Ok(DiskInfo {
                    free_gb: disk_free_gb,
                    total_gb: 100.0,
                    percent_used: 50.0,
                }),
                memory: Ok(MemoryInfo {
                    available_gb: 8.0,
                    total_gb: 16.0,
                    percent_used: ram_percent,
                }),
            }
        }
    }

    impl ResourceSampler for MockSampler {
        fn cpu_percent(&mut self) -> Result<f32, SampleError> {
            self.cpu.clone()
        }

        fn disk_info(&mut self) -> Result<DiskInfo, SampleError> {
            self.disk.clone()
        }

        fn memory_info(&mut self) -> Result<MemoryInfo, SampleError> {
            self.memory.clone()
        }
    }
}
