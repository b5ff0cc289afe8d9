use std::collections::BTreeMap;

use nix::{
    libc::c_long,
    sys::{
        ptrace::{self, AddressType},
        wait::waitpid,
    },
    unistd::Pid,
};
use procfs::process::Process;

use super::Host;
use crate::prelude::{Address, Error, IbResult};

/// Host backed by a live process: the image base comes from its memory map,
/// breakpoints are int3 bytes patched in over ptrace.
pub struct ProcHost {
    pid: Option<Pid>,
    traced: bool,
    /// Original words at patched addresses, restored on drop.
    patched: BTreeMap<Address, c_long>,
}

impl ProcHost {
    pub fn new(pid: Option<i32>) -> Self {
        Self {
            pid: pid.map(Pid::from_raw),
            traced: false,
            patched: BTreeMap::new(),
        }
    }

    fn attach(&mut self, pid: Pid) -> IbResult<()> {
        if self.traced {
            return Ok(());
        }
        ptrace::attach(pid)?;
        waitpid(pid, None)?;
        self.traced = true;
        log::debug!("attached to {}", pid);
        Ok(())
    }
}

impl Host for ProcHost {
    fn image_base(&self) -> IbResult<Address> {
        let pid = self.pid.ok_or(Error::NoProcess)?;
        let process = Process::new(pid.as_raw()).map_err(|err| match err {
            procfs::ProcError::NotFound(_) => Error::NoProcess,
            err => err.into(),
        })?;
        // The lowest mapping is the target image on a standard layout.
        let maps = process.maps()?;
        Ok(maps.first().map(|m| m.address.0).unwrap_or(0))
    }

    fn set_breakpoint(&mut self, addr: Address) -> IbResult<()> {
        let pid = self.pid.ok_or(Error::NoProcess)?;
        self.attach(pid)?;

        let original = ptrace::read(pid, addr as AddressType)?;
        let mut word = original.to_ne_bytes();
        word[0] = 0xcc;
        unsafe {
            ptrace::write(
                pid,
                addr as AddressType,
                c_long::from_ne_bytes(word) as AddressType,
            )?;
        }
        self.patched.insert(addr, original);
        log::info!("breakpoint word patched at 0x{:x}", addr);
        Ok(())
    }
}

impl Drop for ProcHost {
    fn drop(&mut self) {
        if !self.traced {
            return;
        }
        let pid = match self.pid {
            Some(pid) => pid,
            None => return,
        };
        for (addr, original) in &self.patched {
            unsafe {
                let _ = ptrace::write(pid, *addr as AddressType, *original as AddressType);
            }
        }
        let _ = ptrace::detach(pid, None);
    }
}
