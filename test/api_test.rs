use mpu_layout::mpu::{srd_fit, Coalesce, Passthrough, ARMV7M, MPU_REGIONS};
use mpu_layout::{plan_map, try_fit, MemoryBlock, MemoryMap, PlanError, Region, RegionPlanner};
use std::io::Write;

#[test]
fn test_sample_map_layouts() {
    // 1. The reference board
    let map = MemoryMap::sample();

    // 2. Plan every block
    let outcomes = plan_map(&RegionPlanner::default(), &Passthrough, &map);
    assert_eq!(outcomes.len(), 3);

    // 3. rom fits one region
    let rom = outcomes[0].result.as_ref().expect("rom should plan");
    assert_eq!(rom.as_slice(), &[Region::new(0, 0x10_0000, 0)]);

    // 4. sram is 256K + 128K
    let sram = outcomes[1].result.as_ref().expect("sram should plan");
    assert_eq!(
        sram.as_slice(),
        &[
            Region::new(0x2000_0000, 0x4_0000, 0),
            Region::new(0x2004_0000, 0x2_0000, 0),
        ]
    );

    // 5. dram fits inside the budget and reproduces the block exactly
    let dram = outcomes[2].result.as_ref().expect("dram should plan");
    assert!(dram.len() <= MPU_REGIONS);
    let covered: u64 = dram.iter().map(|r| r.effective_size()).sum();
    assert_eq!(covered, 1000 * 1024);
    assert_eq!(dram.covered_range(), Some(0x6000_0000..0x6000_0000 + 1000 * 1024));
}

#[test]
fn test_subregion_fit_for_unaligned_start() {
    let region = srd_fit(&ARMV7M, 0x2000_0020, 0x8000_0000)
        .expect("no invariant violation")
        .expect("a region should fit");
    assert_eq!(region.subregion_disable, 0b0000_0001);
    assert_eq!(region.effective_base(), 0x2000_0020);
    assert_eq!(region.size / 8, 0x20);
}

#[test]
fn test_budget_and_failure_outcomes() {
    let exhausted = try_fit(&MemoryBlock::new("odd", 0x1000_0000, 0x1_1fe0));
    assert!(matches!(exhausted, Err(PlanError::BudgetExhausted { .. })));

    let unfittable = try_fit(&MemoryBlock::new("tiny", 0x1000, 0x10));
    assert!(matches!(unfittable, Err(PlanError::Unfittable { .. })));
}

#[test]
fn test_map_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"blocks": [
            {{"name": "flash", "base": "0x08000000", "size": "1M"}},
            {{"name": "sram", "base": "0x20000000", "size": "384K"}}
        ]}}"#
    )
    .expect("write map");

    let map = MemoryMap::load(file.path()).expect("load map");
    assert_eq!(map.len(), 2);

    let outcomes = plan_map(&RegionPlanner::default(), &Coalesce::default(), &map);
    let flash = outcomes[0].result.as_ref().expect("flash should plan");
    assert_eq!(flash.as_slice(), &[Region::new(0x0800_0000, 0x10_0000, 0)]);
    assert_eq!(outcomes[1].result.as_ref().map(|p| p.len()), Ok(2));
}
