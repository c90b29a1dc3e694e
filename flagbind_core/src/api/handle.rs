use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::model::OpenMode;

/// A file opened by a file parameter.
///
/// Clones share the underlying file, so closing any clone closes them all.
/// Reading or writing a closed handle is an error.
#[derive(Debug, Clone)]
pub struct Handle {
    path: PathBuf,
    mode: OpenMode,
    file: Rc<RefCell<Option<File>>>,
}

impl Handle {
    pub(crate) fn new(path: PathBuf, mode: OpenMode, file: File) -> Self {
        Self {
            path,
            mode,
            file: Rc::new(RefCell::new(Some(file))),
        }
    }

    /// The path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The mode this handle was opened with.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Whether the file is still open.
    pub fn is_open(&self) -> bool {
        self.file.borrow().is_some()
    }

    /// Close the file, flushing it first when it was opened for writing.
    /// Closing an already closed handle does nothing.
    ///
    /// A regular file is also synced to disk.
    /// On failure the file stays open, so the close may be retried.
    pub fn close(&self) -> io::Result<()> {
        let mut slot = self.file.borrow_mut();

        if let Some(file) = slot.as_mut() {
            if self.mode.writable() {
                file.flush()?;

                if file.metadata()?.is_file() {
                    file.sync_all()?;
                }
            }
        }

        slot.take();
        Ok(())
    }

    fn closed(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::Other,
            format!("'{}' is closed", self.path.display()),
        )
    }
}

impl Read for Handle {
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        match self.file.borrow_mut().as_mut() {
            Some(file) => file.read(buffer),
            None => Err(self.closed()),
        }
    }
}

impl Write for Handle {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        match self.file.borrow_mut().as_mut() {
            Some(file) => file.write(buffer),
            None => Err(self.closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.borrow_mut().as_mut() {
            Some(file) => file.flush(),
            None => Err(self.closed()),
        }
    }
}

/// The files opened by parameters declared with `close_on_exit`.
///
/// Clones share the same registry, so one may be kept after the parser is dropped.
#[derive(Debug, Clone, Default)]
pub struct OpenHandles {
    handles: Rc<RefCell<Vec<Handle>>>,
}

impl OpenHandles {
    pub(crate) fn track(&self, handle: Handle) {
        self.handles.borrow_mut().push(handle);
    }

    /// The number of tracked handles.
    pub fn len(&self) -> usize {
        self.handles.borrow().len()
    }

    /// Whether no handles are tracked.
    pub fn is_empty(&self) -> bool {
        self.handles.borrow().is_empty()
    }

    /// Close every tracked handle, in the order they were opened.
    ///
    /// Stops at the first failure, returning it.
    /// The handles closed before the failure are forgotten, the failing handle and those after it remain tracked and open.
    pub fn close_all(&self) -> io::Result<()> {
        close_each(&mut self.handles.borrow_mut(), Handle::close)
    }
}

fn close_each(
    handles: &mut Vec<Handle>,
    close: impl Fn(&Handle) -> io::Result<()>,
) -> io::Result<()> {
    let failure = handles
        .iter()
        .enumerate()
        .find_map(|(index, handle)| close(handle).err().map(|error| (index, error)));

    match failure {
        Some((index, error)) => {
            handles.drain(..index);
            Err(error)
        }
        None => {
            handles.clear();
            Ok(())
        }
    }
}
