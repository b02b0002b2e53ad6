//! Layout math, region alignment, and workspace capacity checks.

use tilemul::{compute_layout, BlockConfig, GemmError, Layout, Workspace, SIMD_ALIGNMENT};

#[test]
fn test_layout_math_default_parameters() {
    let layout = compute_layout(256, 256, 256, 8, 8);

    assert_eq!(layout.a.bytes, 256 * 256 * 4);
    assert_eq!(layout.b.bytes, 256 * 256 * 4);
    assert_eq!(layout.accum.bytes, 8 * 8 * 4);

    // Every section is already 128-byte sized here, so the joins add no
    // padding and the total is the plain sum.
    assert_eq!(layout.total_bytes, 262144 + 262144 + 256);
}

#[test]
fn test_regions_aligned_and_disjoint_across_configs() {
    let shapes = [
        (256, 256, 256, 8, 8),
        (128, 128, 128, 8, 8),
        (64, 64, 64, 4, 4),
        (100, 50, 30, 4, 4),
        (3, 5, 7, 2, 2),
        (1, 1, 1, 1, 1),
        (512, 64, 96, 8, 4),
    ];

    for (bm, bn, bk, mr, nr) in shapes {
        let layout = compute_layout(bm, bn, bk, mr, nr);

        for region in [layout.a, layout.b, layout.accum] {
            assert_eq!(
                region.offset % SIMD_ALIGNMENT,
                0,
                "offset {} not aligned for {}x{}x{}/{}x{}",
                region.offset,
                bm,
                bn,
                bk,
                mr,
                nr
            );
        }
        assert_eq!(layout.total_bytes % SIMD_ALIGNMENT, 0);

        // Back-to-back, never overlapping.
        assert!(layout.a.offset + layout.a.bytes <= layout.b.offset);
        assert!(layout.b.offset + layout.b.bytes <= layout.accum.offset);
        assert!(layout.accum.offset + layout.accum.bytes <= layout.total_bytes);

        assert_eq!(layout.a.bytes, bm * bk * 4);
        assert_eq!(layout.b.bytes, bk * bn * 4);
        assert_eq!(layout.accum.bytes, mr * nr * 4);
    }
}

#[test]
fn test_unaligned_section_sizes_get_padded_joins() {
    // 3x5 floats = 60 bytes, so the B region must start on the next
    // 128-byte boundary.
    let layout = compute_layout(3, 7, 5, 2, 2);
    assert_eq!(layout.a.offset, 0);
    assert_eq!(layout.a.bytes, 60);
    assert_eq!(layout.b.offset, 128);
}

#[test]
fn test_oversized_layout_is_a_config_error() {
    let config = BlockConfig {
        bm: 16384,
        bn: 16384,
        bk: 8192,
        ..BlockConfig::default()
    };
    let err = Layout::for_config(&config).unwrap_err();
    assert!(matches!(err, GemmError::Layout { .. }));
}

#[test]
#[should_panic(expected = "invalid workspace layout")]
fn test_compute_layout_panics_on_oversized_blocks() {
    let _ = compute_layout(16384, 16384, 8192, 8, 8);
}

#[test]
fn test_workspace_capacities_and_alignment() {
    let config = BlockConfig::new(256, 256, 256, 8, 8).unwrap();
    let ws = Workspace::new(&config).unwrap();

    assert_eq!(ws.a_capacity(), 262144);
    assert_eq!(ws.b_capacity(), 262144);
    assert_eq!(ws.accum_capacity(), 256);
    assert_eq!(ws.total_capacity(), 262144 + 262144 + 256);

    assert_eq!(ws.a_panel().as_ptr() as usize % SIMD_ALIGNMENT, 0);
    assert_eq!(ws.b_panel().as_ptr() as usize % SIMD_ALIGNMENT, 0);
    assert_eq!(ws.accum().as_ptr() as usize % SIMD_ALIGNMENT, 0);

    assert_eq!(ws.a_panel().len(), ws.a_capacity() / 4);
    assert_eq!(ws.b_panel().len(), ws.b_capacity() / 4);
    assert_eq!(ws.accum().len(), ws.accum_capacity() / 4);
}
