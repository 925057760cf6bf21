use chainhash_core::config::DEFAULT_CAPACITY;
use chainhash_core::{hash_djb2, key_index, HashTable, TableError};
use log::warn;
use pyo3::exceptions::{PyIOError, PyKeyError, PyMemoryError, PyValueError};
use pyo3::prelude::*;

/// Map a table error onto the matching Python exception
fn to_py_err(err: TableError) -> PyErr {
    match err {
        TableError::InvalidCapacity | TableError::InvalidArgument(_) => {
            PyValueError::new_err(err.to_string())
        }
        TableError::AllocationFailure(_) => PyMemoryError::new_err(err.to_string()),
        TableError::NotFound(key) => PyKeyError::new_err(key),
    }
}

/// Chained hash table with string keys and values
///
/// Fixed capacity, djb2 placement, newest entry first within a bucket.
/// After `delete()` every operation except `print`, `delete` and `repr`
/// raises `ValueError`.
///
/// ```python
/// from chainhash import HashTable
///
/// t = HashTable(5)
/// t.set("a", "1")
/// t.set("b", "2")
/// assert t.get("a") == "1"
/// assert t.get("z") is None
/// t.print()       # {'a': '1', 'b': '2'}
/// t.delete()
/// ```
#[pyclass(name = "HashTable")]
pub struct PyHashTable {
    inner: Option<HashTable>,
}

impl PyHashTable {
    fn live(&self) -> PyResult<&HashTable> {
        self.inner.as_ref().ok_or_else(deleted_err)
    }

    fn live_mut(&mut self) -> PyResult<&mut HashTable> {
        self.inner.as_mut().ok_or_else(deleted_err)
    }
}

fn deleted_err() -> PyErr {
    warn!("operation on a deleted hash table");
    PyValueError::new_err("hash table has been deleted")
}

#[pymethods]
impl PyHashTable {
    #[new]
    #[pyo3(signature = (capacity=DEFAULT_CAPACITY))]
    fn new(capacity: usize) -> PyResult<Self> {
        let table = HashTable::new(capacity).map_err(to_py_err)?;
        Ok(PyHashTable { inner: Some(table) })
    }

    /// Insert or update a key
    fn set(&mut self, key: &str, value: &str) -> PyResult<()> {
        self.live_mut()?.set(key, value).map_err(to_py_err)
    }

    /// Value for `key`, or None
    fn get(&self, key: &str) -> PyResult<Option<String>> {
        Ok(self.live()?.get(key).map(str::to_owned))
    }

    fn __getitem__(&self, key: &str) -> PyResult<String> {
        self.live()?
            .try_get(key)
            .map(str::to_owned)
            .map_err(to_py_err)
    }

    fn __setitem__(&mut self, key: &str, value: &str) -> PyResult<()> {
        self.set(key, value)
    }

    fn __contains__(&self, key: &str) -> PyResult<bool> {
        Ok(self.live()?.contains_key(key))
    }

    fn __len__(&self) -> PyResult<usize> {
        Ok(self.live()?.len())
    }

    /// All pairs in print order (bucket index, then newest first)
    fn items(&self) -> PyResult<Vec<(String, String)>> {
        Ok(self
            .live()?
            .iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect())
    }

    /// Write `{'k': 'v', ...}` to the process stdout; prints nothing once deleted
    fn print(&self) -> PyResult<()> {
        match &self.inner {
            Some(table) => table
                .print()
                .map_err(|e| PyIOError::new_err(format!("Failed to print table: {}", e))),
            None => Ok(()),
        }
    }

    /// Release every entry; further use raises ValueError
    fn delete(&mut self) {
        if let Some(table) = self.inner.take() {
            table.delete();
        }
    }

    /// Number of buckets
    #[getter]
    fn capacity(&self) -> PyResult<usize> {
        Ok(self.live()?.capacity())
    }

    #[getter]
    fn deleted(&self) -> bool {
        self.inner.is_none()
    }

    fn __str__(&self) -> PyResult<String> {
        Ok(self.live()?.to_string())
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            Some(table) => format!(
                "HashTable(size={}/{}, load={:.2})",
                table.len(),
                table.capacity(),
                table.load_factor()
            ),
            None => "HashTable(deleted)".to_string(),
        }
    }
}

/// djb2 hash of a string's UTF-8 bytes
#[pyfunction]
#[pyo3(name = "hash_djb2")]
fn py_hash_djb2(key: &str) -> u64 {
    hash_djb2(key.as_bytes())
}

/// Bucket a key maps to in a table of `capacity` buckets
#[pyfunction]
#[pyo3(name = "key_index")]
fn py_key_index(key: &str, capacity: u64) -> PyResult<u64> {
    if capacity == 0 {
        return Err(to_py_err(TableError::InvalidCapacity));
    }
    Ok(key_index(key.as_bytes(), capacity))
}

#[pymodule]
fn chainhash(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHashTable>()?;
    m.add_function(wrap_pyfunction!(py_hash_djb2, m)?)?;
    m.add_function(wrap_pyfunction!(py_key_index, m)?)?;
    Ok(())
}
