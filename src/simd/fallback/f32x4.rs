//! Scalar 4-lane f32 vector for targets without SIMD support.

use crate::simd::traits::SimdVec;

pub const LANE_COUNT: usize = 4;

/// Four f32 lanes emulated with a plain array.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    elements: [f32; LANE_COUNT],
}

impl SimdVec<f32> for F32x4 {
    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        let mut elements = [0.0; LANE_COUNT];
        for (lane, e) in elements.iter_mut().enumerate() {
            *e = *ptr.add(lane);
        }
        Self { elements }
    }

    #[inline(always)]
    unsafe fn store_at(self, ptr: *mut f32) {
        for (lane, e) in self.elements.iter().enumerate() {
            *ptr.add(lane) = *e;
        }
    }

    #[inline(always)]
    unsafe fn fmadd(self, a: Self, b: Self) -> Self {
        let mut elements = self.elements;
        for lane in 0..LANE_COUNT {
            elements[lane] += a.elements[lane] * b.elements[lane];
        }
        Self { elements }
    }
}
