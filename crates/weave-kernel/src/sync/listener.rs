//! Observer interface for VFS mutations.

use weave_types::{OpKind, OpRecord};

/// Receives notifications for successful mutations.
///
/// Every method has a no-op default, so implementors override only the
/// events they care about. Errors and panics raised here are logged and
/// dropped; they never fail the mutation that triggered them.
pub trait VfsListener: Send + Sync {
    fn on_file_created(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_file_updated(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_file_deleted(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }

    /// `op.path` is the old location, `op.new_path` the new one.
    fn on_file_moved(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_file_copied(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_folder_created(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_folder_deleted(&self, _op: &OpRecord) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Route a record to the listener method for its kind.
pub(crate) fn dispatch(listener: &dyn VfsListener, op: &OpRecord) -> anyhow::Result<()> {
    match op.kind {
        OpKind::FileCreated => listener.on_file_created(op),
        OpKind::FileUpdated => listener.on_file_updated(op),
        OpKind::FileDeleted => listener.on_file_deleted(op),
        OpKind::FileMoved => listener.on_file_moved(op),
        OpKind::FileCopied => listener.on_file_copied(op),
        OpKind::FolderCreated => listener.on_folder_created(op),
        OpKind::FolderDeleted => listener.on_folder_deleted(op),
    }
}
