// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Locates the shared library (or executable) the bridge code is running from.
//!
//! When the bridge is loaded as a plugin, the host process executable lives
//! elsewhere; configuration and assets sit next to the library itself.

use crate::asset::AssetError;
use std::ffi::c_void;
use std::path::{Path, PathBuf};

/// Returns the directory containing the module this crate is linked into.
pub fn module_directory() -> Result<PathBuf, AssetError> {
    let anchor: fn() -> Result<PathBuf, AssetError> = module_directory;
    let path = module_path_of(anchor as *const c_void)?;
    path.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| AssetError::RootUnavailable(format!("'{}' has no parent", path.display())))
}

fn current_exe() -> Result<PathBuf, AssetError> {
    std::env::current_exe().map_err(|e| AssetError::RootUnavailable(e.to_string()))
}

/// Returns the path of the loaded module whose image contains `address`.
#[cfg(any(target_os = "linux", target_os = "macos"))]
pub fn module_path_of(address: *const c_void) -> Result<PathBuf, AssetError> {
    use std::ffi::{CStr, OsStr};
    use std::os::unix::ffi::OsStrExt;

    let mut info = std::mem::MaybeUninit::<libc::Dl_info>::zeroed();
    // SAFETY: dladdr only inspects `address` and writes into `info`.
    let found = unsafe { libc::dladdr(address, info.as_mut_ptr()) };
    if found == 0 {
        return Err(AssetError::RootUnavailable(format!(
            "no loaded module contains address {address:p}"
        )));
    }
    // SAFETY: dladdr succeeded, so `info` is initialised.
    let info = unsafe { info.assume_init() };
    if info.dli_fname.is_null() {
        return current_exe();
    }

    // SAFETY: dli_fname is a NUL-terminated string owned by the dynamic loader.
    let name = unsafe { CStr::from_ptr(info.dli_fname) };
    let path = PathBuf::from(OsStr::from_bytes(name.to_bytes()));

    // The main executable is reported by its argv[0], which may be bare or empty.
    if path.parent().map_or(true, |parent| parent.as_os_str().is_empty()) {
        return current_exe();
    }
    Ok(path.canonicalize().unwrap_or(path))
}

/// Returns the path of the loaded module whose image contains `address`.
#[cfg(windows)]
pub fn module_path_of(address: *const c_void) -> Result<PathBuf, AssetError> {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use winapi::shared::minwindef::{DWORD, HMODULE};
    use winapi::um::libloaderapi::{
        GetModuleFileNameW, GetModuleHandleExW, GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS,
        GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT,
    };

    let mut module: HMODULE = std::ptr::null_mut();
    // SAFETY: with FROM_ADDRESS the name argument is read as an address only.
    let found = unsafe {
        GetModuleHandleExW(
            GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS | GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT,
            address as *const u16,
            &mut module,
        )
    };
    if found == 0 {
        return Err(AssetError::RootUnavailable(
            std::io::Error::last_os_error().to_string(),
        ));
    }

    let mut buffer = vec![0u16; 260];
    loop {
        // SAFETY: the buffer is valid for `buffer.len()` UTF-16 units.
        let len = unsafe {
            GetModuleFileNameW(module, buffer.as_mut_ptr(), buffer.len() as DWORD)
        } as usize;
        if len == 0 {
            return Err(AssetError::RootUnavailable(
                std::io::Error::last_os_error().to_string(),
            ));
        }
        if len < buffer.len() {
            buffer.truncate(len);
            return Ok(PathBuf::from(OsString::from_wide(&buffer)));
        }
        // Truncated; retry with a larger buffer.
        buffer.resize(buffer.len() * 2, 0);
    }
}

/// Falls back to the running executable where module lookup is unsupported.
#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub fn module_path_of(_address: *const c_void) -> Result<PathBuf, AssetError> {
    current_exe()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    #[test]
    fn test_statically_linked_code_resolves_to_executable() {
        let exe = std::env::current_exe().unwrap();
        let dir = module_directory().unwrap();
        assert_eq!(canonical(&dir), canonical(exe.parent().unwrap()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_address_in_shared_library_names_that_library() {
        let path = module_path_of(libc::free as *const c_void).unwrap();
        let exe = std::env::current_exe().unwrap();

        assert_ne!(canonical(&path), canonical(&exe));
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("libc"), "resolved {}", path.display());
    }

    #[cfg(windows)]
    #[test]
    fn test_address_in_shared_library_names_that_library() {
        use winapi::um::libloaderapi::GetModuleFileNameW;

        let path = module_path_of(GetModuleFileNameW as *const c_void).unwrap();
        let exe = std::env::current_exe().unwrap();

        assert_ne!(canonical(&path), canonical(&exe));
        let file_name = path.file_name().unwrap().to_string_lossy().to_ascii_lowercase();
        assert!(file_name.ends_with(".dll"), "resolved {}", path.display());
    }
}
