/// In-process view of a loaded module's memory.
///
/// The scanner and resolver only ever see this trait, so they can run
/// against a mock image in tests just as well as against the live process.
pub trait ModuleMemory {
    /// Base load address of the module.
    fn base(&self) -> u64;

    /// The module's mapped bytes.
    fn view(&self) -> &[u8];
}
