pub mod proc;

use super::{error::IbResult, Address};

/// What the resolver needs from the hosting debugger: where the target image
/// landed, how wide its pointers are, and a way to plant a breakpoint.
pub trait Host {
    /// Runtime load address of the target image, queried fresh on every call.
    /// Returns `Error::NoProcess` when there is nothing to query.
    fn image_base(&self) -> IbResult<Address>;

    /// Native pointer width in bytes, used for output padding.
    fn addr_width(&self) -> usize {
        std::mem::size_of::<usize>()
    }

    /// Place an execution breakpoint at an absolute address.
    fn set_breakpoint(&mut self, addr: Address) -> IbResult<()>;
}
