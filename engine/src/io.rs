//! Utilities for reading and writing data structures from and to disk.
//!
//! Everything is stored as raw native-endian byte dumps of flat vectors, one file per vector.
//! Import the `Load` and `Store` traits and use the `load_from` and `write_to` methods
//! for single vectors, `Deconstruct` and `Reconstruct` for types made up of several of them.
//!
//! # Example
//!
//! ```no_run
//! # use sp_algo::io::*;
//!
//! let head = Vec::<u32>::load_from("head")?;
//! head.write_to(&"head_copy")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{
    ffi::OsStr,
    fs::{metadata, File},
    io::{prelude::*, Error, ErrorKind, Result},
    mem,
    path::Path,
    slice,
};

/// Access the data of an object as a slice of bytes.
/// The bytes have to allow recreating the object when reading them back from disk.
///
/// Do not use this Trait but rather the `Store` trait.
pub trait DataBytes {
    fn data_bytes(&self) -> &[u8];
}

/// Mutable access to the internal data of a precreated object of the right size,
/// so that serialized bytes can be read directly into it.
///
/// Do not use this Trait but rather the `Load` trait.
pub trait DataBytesMut {
    fn data_bytes_mut(&mut self) -> &mut [u8];
}

impl<T: Copy> DataBytes for [T] {
    fn data_bytes(&self) -> &[u8] {
        let num_bytes = mem::size_of_val(self);
        unsafe { slice::from_raw_parts(self.as_ptr() as *const u8, num_bytes) }
    }
}

impl<T: Copy> DataBytes for &[T] {
    fn data_bytes(&self) -> &[u8] {
        (**self).data_bytes()
    }
}

impl<T: Copy> DataBytes for Vec<T> {
    fn data_bytes(&self) -> &[u8] {
        self[..].data_bytes()
    }
}

impl<T: Copy> DataBytesMut for [T] {
    fn data_bytes_mut(&mut self) -> &mut [u8] {
        let num_bytes = mem::size_of_val(self);
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr() as *mut u8, num_bytes) }
    }
}

impl<T: Copy> DataBytesMut for Vec<T> {
    fn data_bytes_mut(&mut self) -> &mut [u8] {
        self[..].data_bytes_mut()
    }
}

/// Write serialized objects to disk.
pub trait Store: DataBytes {
    /// Writes the serialized object to the file with the given path
    fn write_to(&self, path: &dyn AsRef<Path>) -> Result<()> {
        File::create(path)?.write_all(self.data_bytes())
    }
}

impl<T: DataBytes> Store for T {}
impl<T> Store for [T] where [T]: DataBytes {}

/// Load serialized data back into objects.
pub trait Load: DataBytesMut + Sized {
    /// Create an object of the correct size for serialized data with the given number of bytes.
    /// Fails when the byte count does not fit the element type.
    fn new_with_bytes(num_bytes: usize) -> Result<Self>;

    /// Create an object of the appropriate size for the file at `path` and read the bytes into it.
    fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let num_bytes = metadata(path.as_ref())?.len() as usize;
        let mut file = File::open(path)?;

        let mut object = Self::new_with_bytes(num_bytes)?;
        debug_assert_eq!(num_bytes, object.data_bytes_mut().len());
        file.read_exact(object.data_bytes_mut())?;

        Ok(object)
    }
}

impl<T: Default + Copy> Load for Vec<T> {
    fn new_with_bytes(num_bytes: usize) -> Result<Self> {
        if num_bytes % mem::size_of::<T>() != 0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("{} bytes is not a multiple of the element size {}", num_bytes, mem::size_of::<T>()),
            ));
        }
        Ok(vec![T::default(); num_bytes / mem::size_of::<T>()])
    }
}

/// Serialize objects which need more than a single file.
pub trait Deconstruct: Sized {
    /// Call `store_callback` for each file that should be written to disk.
    /// The first param of the callback is a name to identify the file, the second param the data to be stored.
    fn store_each(&self, store_callback: &dyn Fn(&str, &dyn Store) -> Result<()>) -> Result<()>;

    /// Store this object in the directory `dir`, which has to exist.
    fn deconstruct_to<D: AsRef<OsStr>>(&self, dir: &D) -> Result<()> {
        let path = Path::new(dir);

        self.store_each(&|name, object: &dyn Store| object.write_to(&path.join(name)))
    }
}

/// Handed to `Reconstruct::reconstruct_with` to load the individual files back.
#[derive(Debug, Clone, Copy)]
pub struct Loader<'a> {
    path: &'a Path,
}

impl<'a> Loader<'a> {
    /// Load the file which was stored under `name` by the `store_each` callback.
    pub fn load<T: Load, P: AsRef<Path>>(&self, name: P) -> Result<T> {
        T::load_from(self.path.join(name))
    }

    /// Whether a file was stored under `name`, for optional parts.
    pub fn has<P: AsRef<Path>>(&self, name: P) -> bool {
        self.path.join(name).is_file()
    }
}

/// Deserialize objects which need more than a single file.
pub trait Reconstruct: Sized {
    /// Use the loader to load all the necessary files and assemble the object.
    fn reconstruct_with(loader: Loader) -> Result<Self>;

    /// Reconstruct an object from the directory `dir`.
    fn reconstruct_from<D: AsRef<OsStr>>(dir: &D) -> Result<Self> {
        let path = Path::new(dir);
        Self::reconstruct_with(Loader { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_survive_a_trip_through_the_filesystem() {
        let dir = std::env::temp_dir().join(format!("sp_algo_io_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("values");

        vec![3u32, 1, 4, 1, 5].write_to(&file).unwrap();
        assert_eq!(Vec::<u32>::load_from(&file).unwrap(), vec![3, 1, 4, 1, 5]);

        // 20 bytes do not make up a whole number of u64
        assert_eq!(Vec::<u64>::load_from(&file).unwrap_err().kind(), ErrorKind::InvalidData);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
