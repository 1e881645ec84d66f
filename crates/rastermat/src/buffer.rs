/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module encapsulates untyped storage for image samples
//!
//! A buffer is analogous to C/C++ `void *` but comes with some safety
//! measures imposed by its usage and the Rust interface in general.
//! Every buffer carries a [`SampleType`] tag naming the type it was
//! created to store, and typed access goes through checked
//! `reinterpret` methods that verify the tag, the alignment and the
//! length before handing out a slice.
//!
//! Allocation is fallible. The conversion engine treats an allocation
//! failure as a reportable error rather than an abort, so buffers hand
//! back [`BufferErrors::AllocationFailed`] instead of panicking.
use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use std::fmt::{Debug, Display, Formatter};
use std::mem::size_of;

use bytemuck::Pod;
use rastermat_core::sample::SampleType;

/// Minimum alignment for all buffer allocations
///
/// This makes it possible to reinterpret buffer data safely
/// as whatever sample type we so wish without worrying that it would be
/// wrongly misaligned, especially on platforms where reading unaligned
/// data is UB.
///
/// 64 covers the widest register types in common use, so every
/// narrower type is transitively aligned.
pub const MIN_ALIGNMENT: usize = 64;

/// Marker for Rust types that can live inside a [`PixelBuffer`]
///
/// The constant ties the type to the tag a buffer carries, checked
/// reinterpretation compares the two.
pub trait Sample: Pod + Default + 'static {
    /// The tag a buffer storing this type carries
    const SAMPLE_TYPE: SampleType;
}

impl Sample for u8 {
    const SAMPLE_TYPE: SampleType = SampleType::U8;
}

impl Sample for i8 {
    const SAMPLE_TYPE: SampleType = SampleType::I8;
}

impl Sample for u16 {
    const SAMPLE_TYPE: SampleType = SampleType::U16;
}

impl Sample for i16 {
    const SAMPLE_TYPE: SampleType = SampleType::I16;
}

impl Sample for i32 {
    const SAMPLE_TYPE: SampleType = SampleType::I32;
}

impl Sample for f32 {
    const SAMPLE_TYPE: SampleType = SampleType::F32;
}

impl Sample for f64 {
    const SAMPLE_TYPE: SampleType = SampleType::F64;
}

/// Errors that can occur when manipulating buffers
#[derive(Copy, Clone)]
pub enum BufferErrors {
    /// rarely, since all allocations are aligned to MIN_ALIGNMENT, but just in case
    UnalignedPointer(usize, usize),
    /// The size of the requested type does not evenly divide the
    /// buffer byte length
    UnevenLength(usize, usize),
    /// The buffer was created with a different sample type than the
    /// one requested
    WrongSampleType(SampleType, SampleType),
    /// The allocator could not provide the requested number of bytes
    AllocationFailed(usize)
}

impl Debug for BufferErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferErrors::UnalignedPointer(found, align) => {
                writeln!(f, "Buffer pointer {found} is not aligned to {align}")
            }
            BufferErrors::UnevenLength(length, size_of_1) => {
                writeln!(
                    f,
                    "Size of {size_of_1} cannot evenly divide length {length}"
                )
            }
            BufferErrors::WrongSampleType(expected, found) => {
                writeln!(
                    f,
                    "Wrong sample type {found:?}, buffer was created to store {expected:?}"
                )
            }
            BufferErrors::AllocationFailed(size) => {
                writeln!(f, "Could not allocate {size} bytes of sample storage")
            }
        }
    }
}

impl Display for BufferErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for BufferErrors {}

/// Untyped storage for image samples
///
/// A buffer can be thought of as a bag of bits with a fixed length,
/// tagged with the sample type it was created for. The tag gates the
/// `reinterpret` methods, which are the intended way to read or write
/// typed data.
///
/// Unlike a `Vec<T>` a buffer never grows, its size is fixed at
/// creation from the image geometry it is meant to hold.
#[derive(Eq)]
pub struct PixelBuffer {
    ptr:         *mut u8,
    length:      usize,
    // tag for which the buffer was created
    sample_type: SampleType
}

// safety: The compiler cannot see that we own the data behind self.ptr
// since it is a raw pointer, but we allocate and free it ourselves and
// never hand the pointer out.
unsafe impl Send for PixelBuffer {}

unsafe impl Sync for PixelBuffer {}

impl PixelBuffer {
    /// Allocate zeroed bytes aligned to MIN_ALIGNMENT.
    ///
    /// It is not unsafe to call this, it's just left as unsafe
    /// to remind one to be careful of what they are doing
    unsafe fn alloc(size: usize) -> Result<*mut u8, BufferErrors> {
        if size == 0 {
            // zero sized layouts cannot go through the allocator,
            // hand out an aligned dangling pointer instead
            return Ok(MIN_ALIGNMENT as *mut u8);
        }
        let layout = match Layout::from_size_align(size, MIN_ALIGNMENT) {
            Ok(layout) => layout,
            Err(_) => return Err(BufferErrors::AllocationFailed(size))
        };
        let ptr = alloc_zeroed(layout);

        if ptr.is_null() {
            return Err(BufferErrors::AllocationFailed(size));
        }
        Ok(ptr)
    }

    /// Deallocate storage owned by this buffer
    unsafe fn dealloc(&mut self) {
        if self.length == 0 {
            return;
        }
        // safety: the layout was validated when the buffer was
        // allocated, and alignment matches the one used for alloc
        let layout = Layout::from_size_align_unchecked(self.length, MIN_ALIGNMENT);

        dealloc(self.ptr, layout);
    }

    /// Create a zero filled buffer holding `samples` samples of
    /// `sample_type`
    ///
    /// # Arguments
    /// - sample_type: The storage type the buffer is created for
    /// - samples: Number of samples, not bytes
    pub fn new_zeroed(
        sample_type: SampleType, samples: usize
    ) -> Result<PixelBuffer, BufferErrors> {
        let length = match samples.checked_mul(sample_type.size_of()) {
            Some(length) => length,
            None => return Err(BufferErrors::AllocationFailed(usize::MAX))
        };
        let ptr = unsafe { Self::alloc(length)? };

        Ok(PixelBuffer {
            ptr,
            length,
            sample_type
        })
    }

    /// Create a buffer holding a copy of `data`
    ///
    /// # Example
    /// ```
    /// use rastermat::buffer::PixelBuffer;
    /// let buffer = PixelBuffer::from_samples(&[1_u16, 2, 3]).unwrap();
    /// assert_eq!(buffer.reinterpret_as::<u16>().unwrap(), &[1, 2, 3]);
    /// ```
    pub fn from_samples<T: Sample>(data: &[T]) -> Result<PixelBuffer, BufferErrors> {
        let mut buffer = Self::new_zeroed(T::SAMPLE_TYPE, data.len())?;

        buffer.reinterpret_as_mut::<T>()?.copy_from_slice(data);

        Ok(buffer)
    }

    /// Create a buffer of `samples` samples all set to `elm`
    ///
    /// # Example
    /// ```
    /// use rastermat::buffer::PixelBuffer;
    /// let buffer = PixelBuffer::from_elm(100, 90_u16).unwrap();
    /// assert_eq!(buffer.reinterpret_as::<u16>().unwrap(), &[90; 100]);
    /// ```
    pub fn from_elm<T: Sample>(samples: usize, elm: T) -> Result<PixelBuffer, BufferErrors> {
        let mut buffer = Self::new_zeroed(T::SAMPLE_TYPE, samples)?;

        buffer.fill(elm)?;

        Ok(buffer)
    }

    /// Return the length of the buffer in bytes, not samples
    ///
    /// A buffer holding ten `u16` samples has a length of twenty
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Return true whether this buffer length is zero
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Return the number of samples stored, the byte length over the
    /// size of the sample type
    pub const fn num_samples(&self) -> usize {
        self.length / self.sample_type.size_of()
    }

    /// Return the sample type tag the buffer was created with
    ///
    /// This allows some sort of dynamic type checking
    pub const fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Reinterpret the buffer as a slice of `T`
    ///
    /// Fails when `T` does not match the tag the buffer was created
    /// with, or when size and alignment do not line up
    pub fn reinterpret_as<T: Sample>(&self) -> Result<&[T], BufferErrors> {
        // check the tag, the alignment and that T evenly divides us
        self.confirm_suspicions::<T>()?;

        // safety: we own the data and length spans the allocation
        let slice = unsafe { std::slice::from_raw_parts(self.ptr, self.length) };

        let (before, samples, after) = bytemuck::pod_align_to(slice);

        assert!(before.is_empty(), "extra sloppy bytes");
        assert!(after.is_empty(), "extra sloppy bytes");

        Ok(samples)
    }

    /// Reinterpret the buffer as a mutable slice of `T`
    pub fn reinterpret_as_mut<T: Sample>(&mut self) -> Result<&mut [T], BufferErrors> {
        self.confirm_suspicions::<T>()?;

        // safety: we own the data and length spans the allocation
        let slice = unsafe { std::slice::from_raw_parts_mut(self.ptr, self.length) };

        let (before, samples, after) = bytemuck::pod_align_to_mut(slice);

        assert!(before.is_empty(), "extra sloppy bytes");
        assert!(after.is_empty(), "extra sloppy bytes");

        Ok(samples)
    }

    /// Fill the buffer with a specific sample value
    ///
    /// # Example
    /// ```
    /// use rastermat::buffer::PixelBuffer;
    /// use rastermat_core::sample::SampleType;
    /// let mut buffer = PixelBuffer::new_zeroed(SampleType::U16, 50).unwrap();
    /// buffer.fill(100_u16).unwrap();
    /// assert_eq!(buffer.reinterpret_as::<u16>().unwrap(), &[100; 50]);
    /// ```
    pub fn fill<T: Sample>(&mut self, element: T) -> Result<(), BufferErrors> {
        let array = self.reinterpret_as_mut()?;

        array.fill(element);

        Ok(())
    }

    /// Confirm that the data is aligned, that `T` evenly divides the
    /// length and that `T` matches the tag
    fn confirm_suspicions<T: Sample>(&self) -> Result<(), BufferErrors> {
        if !is_aligned::<T>(self.ptr) {
            return Err(BufferErrors::UnalignedPointer(
                self.ptr as usize,
                size_of::<T>()
            ));
        }

        if self.length % size_of::<T>() != 0 {
            return Err(BufferErrors::UnevenLength(self.length, size_of::<T>()));
        }

        if T::SAMPLE_TYPE != self.sample_type {
            return Err(BufferErrors::WrongSampleType(
                self.sample_type,
                T::SAMPLE_TYPE
            ));
        }

        Ok(())
    }

    /// Return the raw memory of the buffer as `&[u8]`
    ///
    /// # Safety
    /// This is unsafe just as a reminder that the memory is just
    /// a bag of bytes and may not be `&[u8]`.
    pub unsafe fn alias(&self) -> &[u8] {
        std::slice::from_raw_parts(self.ptr, self.length)
    }

    /// Return the raw memory of the buffer as `&mut [u8]`
    ///
    /// # Safety
    /// This is unsafe just as a reminder that the memory is just
    /// a bag of bytes and may not be `&mut [u8]`.
    pub unsafe fn alias_mut(&mut self) -> &mut [u8] {
        std::slice::from_raw_parts_mut(self.ptr, self.length)
    }

    /// Change the sample type tag without touching stored bytes.
    ///
    /// The new tag must name a type of the same size as the current
    /// one. This is the single point where storage is reinterpreted
    /// rather than converted, used when signed bytes collapse to
    /// unsigned byte matrices and when unsigned 16 bit data is
    /// narrowed to signed 16 bit elements.
    pub(crate) fn retag(&mut self, sample_type: SampleType) {
        debug_assert_eq!(self.sample_type.size_of(), sample_type.size_of());

        self.sample_type = sample_type;
    }
}

impl Clone for PixelBuffer {
    fn clone(&self) -> Self {
        let mut copy = match PixelBuffer::new_zeroed(self.sample_type, self.num_samples()) {
            Ok(copy) => copy,
            Err(_) => {
                // Clone cannot surface errors, use the standard
                // allocator failure hook.
                // safety: the layout was valid when this buffer was
                // first allocated
                let layout =
                    unsafe { Layout::from_size_align_unchecked(self.length, MIN_ALIGNMENT) };
                handle_alloc_error(layout)
            }
        };
        // safety: lengths match and both sides are owned allocations
        unsafe {
            copy.alias_mut().copy_from_slice(self.alias());
        }
        copy
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        if self.sample_type != other.sample_type {
            return false;
        }
        // same length and tag, compare them as bags of bytes
        unsafe { self.alias() == other.alias() }
    }
}

impl Debug for PixelBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "PixelBuffer {{ sample_type: {:?}, bytes: {} }}",
            self.sample_type, self.length
        )
    }
}

impl Drop for PixelBuffer {
    fn drop(&mut self) {
        unsafe {
            self.dealloc();
        }
    }
}

/// Check if a pointer is aligned.
fn is_aligned<T>(ptr: *const u8) -> bool {
    let size = core::mem::size_of::<T>();

    (ptr as usize) & (size - 1) == 0
}

#[cfg(test)]
mod tests {
    use rastermat_core::sample::SampleType;

    use crate::buffer::PixelBuffer;

    /// check that we can't convert to a type we weren't made with
    #[test]
    fn test_wrong_interpretation() {
        let buffer = PixelBuffer::new_zeroed(SampleType::U8, 16).unwrap();
        assert!(buffer.reinterpret_as::<u16>().is_err());
    }

    #[test]
    fn test_correct_interpretation() {
        let buffer = PixelBuffer::from_samples(&[70_u16, 16]).unwrap();
        assert_eq!(buffer.reinterpret_as::<u16>().unwrap(), &[70, 16]);
    }

    #[test]
    fn test_clone_works() {
        let buffer = PixelBuffer::from_samples(&[10_u8; 10]).unwrap();
        let copy = buffer.clone();

        assert_eq!(buffer, copy);
    }

    #[test]
    fn test_lengths_are_bytes() {
        let buffer = PixelBuffer::new_zeroed(SampleType::F32, 5).unwrap();
        assert_eq!(buffer.len(), 20);
        assert_eq!(buffer.num_samples(), 5);
    }

    #[test]
    fn test_zero_length() {
        let buffer = PixelBuffer::new_zeroed(SampleType::F64, 0).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.reinterpret_as::<f64>().unwrap().is_empty());
        let _ = buffer.clone();
    }

    #[test]
    fn test_retag_preserves_bits() {
        let mut buffer = PixelBuffer::from_samples(&[0xffff_u16, 0x8000]).unwrap();
        buffer.retag(SampleType::I16);

        assert_eq!(buffer.sample_type(), SampleType::I16);
        assert_eq!(buffer.reinterpret_as::<i16>().unwrap(), &[-1, i16::MIN]);
    }
}
