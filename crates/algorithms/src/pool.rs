//! Typed free-lists of element buffers
//!
//! Buffers handed out by [`ElementPool::take`] are always filled with
//! `T::default()`; recycled buffers are zeroized before they are stored, so
//! nothing from a previous computation is ever observable.

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::ec::bn254::{
    Fp, Fp12, Fp12Double, Fp2, Fp2Double, Fp6, Fp6Double, FpDouble, LineCoeffs,
};

/// Default number of recycled buffers kept per slot
pub const DEFAULT_POOL_CAPACITY: usize = 32;

/// A free-list of buffers of one element type.
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<Vec<T>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<T> Pool<T>
where
    T: Copy + Default + Zeroize,
{
    /// Create a pool that keeps at most `capacity` recycled buffers
    pub fn new(capacity: usize) -> Self {
        Pool {
            free: Vec::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// A buffer of `len` default elements, reused when one is available
    pub fn take(&mut self, len: usize) -> Vec<T> {
        match self.free.pop() {
            Some(mut buf) => {
                self.hits += 1;
                buf.clear();
                buf.resize(len, T::default());
                buf
            }
            None => {
                self.misses += 1;
                vec![T::default(); len]
            }
        }
    }

    /// Return a buffer; it is zeroized and dropped if the pool is full
    pub fn recycle(&mut self, mut buf: Vec<T>) {
        buf.zeroize();
        if self.free.len() < self.capacity {
            self.free.push(buf);
        }
    }

    /// Takes served from the free-list
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Takes that allocated
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Buffers currently waiting for reuse
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Maximum number of buffers kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every stored buffer
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

/// Element types with a slot in [`ElementPool`]
pub trait PoolSlot: Copy + Default + Zeroize + Sized {
    /// The free-list for this type
    fn slot(pool: &mut ElementPool) -> &mut Pool<Self>;
}

/// One free-list per tower level and precision, plus line coefficients.
#[derive(Debug)]
pub struct ElementPool {
    fp: Pool<Fp>,
    fp2: Pool<Fp2>,
    fp6: Pool<Fp6>,
    fp12: Pool<Fp12>,
    fp_double: Pool<FpDouble>,
    fp2_double: Pool<Fp2Double>,
    fp6_double: Pool<Fp6Double>,
    fp12_double: Pool<Fp12Double>,
    lines: Pool<LineCoeffs>,
}

impl Default for ElementPool {
    fn default() -> Self {
        ElementPool::new(DEFAULT_POOL_CAPACITY)
    }
}

macro_rules! impl_pool_slot {
    ($ty:ty, $field:ident) => {
        impl PoolSlot for $ty {
            fn slot(pool: &mut ElementPool) -> &mut Pool<Self> {
                &mut pool.$field
            }
        }
    };
}

impl_pool_slot!(Fp, fp);
impl_pool_slot!(Fp2, fp2);
impl_pool_slot!(Fp6, fp6);
impl_pool_slot!(Fp12, fp12);
impl_pool_slot!(FpDouble, fp_double);
impl_pool_slot!(Fp2Double, fp2_double);
impl_pool_slot!(Fp6Double, fp6_double);
impl_pool_slot!(Fp12Double, fp12_double);
impl_pool_slot!(LineCoeffs, lines);

impl ElementPool {
    /// Create a pool keeping at most `capacity` buffers per slot
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "creating element pool");
        ElementPool {
            fp: Pool::new(capacity),
            fp2: Pool::new(capacity),
            fp6: Pool::new(capacity),
            fp12: Pool::new(capacity),
            fp_double: Pool::new(capacity),
            fp2_double: Pool::new(capacity),
            fp6_double: Pool::new(capacity),
            fp12_double: Pool::new(capacity),
            lines: Pool::new(capacity),
        }
    }

    /// A buffer of `len` default elements of type `T`
    pub fn take<T: PoolSlot>(&mut self, len: usize) -> Vec<T> {
        let slot = T::slot(self);
        let reused = slot.available() > 0;
        let buf = slot.take(len);
        trace!(
            element = core::any::type_name::<T>(),
            len,
            hit = reused,
            "pool take"
        );
        buf
    }

    /// Return a buffer to its slot
    pub fn recycle<T: PoolSlot>(&mut self, buf: Vec<T>) {
        T::slot(self).recycle(buf);
    }

    /// The free-list for `T`
    pub fn slot<T: PoolSlot>(&mut self) -> &mut Pool<T> {
        T::slot(self)
    }

    /// Total hits over all slots
    pub fn hits(&self) -> u64 {
        self.fp.hits()
            + self.fp2.hits()
            + self.fp6.hits()
            + self.fp12.hits()
            + self.fp_double.hits()
            + self.fp2_double.hits()
            + self.fp6_double.hits()
            + self.fp12_double.hits()
            + self.lines.hits()
    }

    /// Total misses over all slots
    pub fn misses(&self) -> u64 {
        self.fp.misses()
            + self.fp2.misses()
            + self.fp6.misses()
            + self.fp12.misses()
            + self.fp_double.misses()
            + self.fp2_double.misses()
            + self.fp6_double.misses()
            + self.fp12_double.misses()
            + self.lines.misses()
    }

    /// Maximum number of buffers kept per slot
    pub fn capacity(&self) -> usize {
        self.fp.capacity()
    }

    /// Drop every stored buffer
    pub fn clear(&mut self) {
        self.fp.clear();
        self.fp2.clear();
        self.fp6.clear();
        self.fp12.clear();
        self.fp_double.clear();
        self.fp2_double.clear();
        self.fp6_double.clear();
        self.fp12_double.clear();
        self.lines.clear();
    }
}
