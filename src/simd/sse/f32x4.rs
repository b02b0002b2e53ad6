//! SSE 4-lane f32 SIMD vector.

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::simd::traits::SimdVec;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 single-precision values backed by an XMM register.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    elements: __m128,
}

impl SimdVec<f32> for F32x4 {
    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: _mm_set1_ps(value),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            elements: _mm_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_at(self, ptr: *mut f32) {
        _mm_storeu_ps(ptr, self.elements);
    }

    #[inline(always)]
    unsafe fn fmadd(self, a: Self, b: Self) -> Self {
        Self {
            elements: _mm_add_ps(self.elements, _mm_mul_ps(a.elements, b.elements)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_roundtrip() {
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [0.0f32; 4];
        unsafe {
            F32x4::load(data.as_ptr()).store_at(out.as_mut_ptr());
        }
        assert_eq!(data, out);
    }

    #[test]
    fn test_splat_fmadd() {
        let b = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [0.0f32; 4];
        unsafe {
            let acc = F32x4::splat(10.0);
            let a = F32x4::splat(2.0);
            let bv = F32x4::load(b.as_ptr());
            acc.fmadd(a, bv).store_at(out.as_mut_ptr());
        }
        assert_eq!(out, [12.0, 14.0, 16.0, 18.0]);
    }
}
