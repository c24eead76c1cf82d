pub type CmdResult<T> = repackage::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Emit a JSON envelope instead of progress lines.
    pub json: bool,
}

pub mod fix;
