use std::ffi::{CStr, CString};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::{KernelIdentity, PartitionSpace};

/// Query a mount point with statvfs(3). Figures follow df: `free` is what an
/// unprivileged user can still allocate, `used` excludes reserved blocks.
pub fn statvfs_space(mount: &Path) -> io::Result<PartitionSpace> {
    let c_path = CString::new(mount.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    let stat = unsafe { stat.assume_init() };

    let frsize = stat.f_frsize as u64;
    let blocks = stat.f_blocks as u64;
    let bfree = stat.f_bfree as u64;
    let bavail = stat.f_bavail as u64;

    Ok(PartitionSpace {
        total: blocks.saturating_mul(frsize),
        used: blocks.saturating_sub(bfree).saturating_mul(frsize),
        free: bavail.saturating_mul(frsize),
    })
}

/// Kernel identity from uname(2).
pub fn uname() -> io::Result<KernelIdentity> {
    let mut uts = MaybeUninit::<libc::utsname>::uninit();
    let rc = unsafe { libc::uname(uts.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    let uts = unsafe { uts.assume_init() };

    Ok(KernelIdentity {
        sysname: field_to_string(&uts.sysname),
        release: field_to_string(&uts.release),
        version: field_to_string(&uts.version),
    })
}

fn field_to_string(field: &[libc::c_char]) -> String {
    // uname fills each field with a NUL-terminated string
    unsafe { CStr::from_ptr(field.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_statable() {
        let space = statvfs_space(Path::new("/")).unwrap();
        assert!(space.total >= space.used);
    }

    #[test]
    fn missing_mount_is_an_error() {
        let err = statvfs_space(Path::new("/definitely/not/mounted/here")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn uname_reports_kernel_fields() {
        let identity = uname().unwrap();
        assert!(!identity.sysname.is_empty());
        assert!(!identity.release.is_empty());
        assert!(!identity.version.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn uname_sysname_is_linux() {
        assert_eq!(uname().unwrap().sysname, "Linux");
    }
}
