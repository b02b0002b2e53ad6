//! Workspace lifetime behavior: repeated construction never fails or
//! leaks, and `reset` touches exactly the accumulator region.

use tilemul::{BlockConfig, Workspace};

#[test]
fn test_repeated_construction_and_destruction() {
    let config = BlockConfig::new(128, 128, 128, 8, 8).unwrap();

    for i in 0..2000 {
        let ws = Workspace::new(&config)
            .unwrap_or_else(|e| panic!("iteration {} failed to allocate: {}", i, e));
        assert_eq!(ws.a_capacity(), 128 * 128 * 4);
    }
}

#[test]
fn test_reset_zeroes_only_the_accumulator() {
    let config = BlockConfig::new(128, 128, 128, 8, 8).unwrap();
    let mut ws = Workspace::new(&config).unwrap();

    for (i, x) in ws.a_panel_mut().iter_mut().enumerate() {
        *x = i as f32;
    }
    for (i, x) in ws.b_panel_mut().iter_mut().enumerate() {
        *x = -(i as f32);
    }
    ws.accum_mut().fill(123.456);

    let a_before = ws.a_panel().to_vec();
    let b_before = ws.b_panel().to_vec();
    let accum_elements = ws.accum_capacity() / 4;

    ws.reset();

    assert_eq!(ws.accum().len(), accum_elements);
    assert!(ws.accum().iter().all(|&x| x == 0.0));
    assert_eq!(ws.a_panel(), &a_before[..], "reset disturbed the A panel");
    assert_eq!(ws.b_panel(), &b_before[..], "reset disturbed the B panel");
}

#[test]
fn test_fresh_workspace_reads_as_zero() {
    let config = BlockConfig::new(64, 32, 16, 4, 4).unwrap();
    let ws = Workspace::new(&config).unwrap();

    assert!(ws.a_panel().iter().all(|&x| x == 0.0));
    assert!(ws.b_panel().iter().all(|&x| x == 0.0));
    assert!(ws.accum().iter().all(|&x| x == 0.0));
}
