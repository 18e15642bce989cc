use grid_inventory::drag::{DragSession, DropOutcome};
use grid_inventory::inventory::InventoryEvent;
use grid_inventory::layout::Point;
use grid_inventory::pickup::{GroundItem, try_pickup};
use grid_inventory::save::{SaveManager, SaveType};
use grid_inventory::{GridInventory, InventoryConfig, ItemRegistry, PlayerInventory};
use log::{info, warn};

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => InventoryConfig::load(&path).map_err(|e| e.to_string())?,
        None => InventoryConfig::default(),
    };
    let size = config.grid_size().map_err(|e| e.to_string())?;
    let layout = config.tile_layout();

    let registry = ItemRegistry::create_default();
    let mut inventory = PlayerInventory::with_default_items(size, &registry)
        .map_err(|e| format!("Failed to create inventory: {}", e))?;
    inventory.subscribe(|event| {
        if let InventoryEvent::Sorted { order, placements } = event {
            info!("Layout changed ({:?}): {} items", order, placements.len());
        }
    });

    // A few things lying around the player
    let player = (100, 100);
    let ground = [
        GroundItem::new("helmet", 110, 95),
        GroundItem::new("boots", 90, 112),
        GroundItem::new("health_potion", 300, 40),
        GroundItem::new("ring", 100, 100),
    ];
    for item in &ground {
        match try_pickup(&mut inventory, &registry, player, item, config.pickup_range) {
            Ok((id, outcome)) => info!("Picked up {} as {} ({:?})", item.def_id, id, outcome),
            Err(e) => warn!("Couldn't pick up {}: {}", item.def_id, e),
        }
    }

    println!("After pickups:\n{}", render_ascii(inventory.grid()));

    // Drag the helmet to the bottom-right corner
    let dragged = inventory
        .items()
        .find(|i| i.def_id == "helmet")
        .map(|i| (i.id, i.footprint));
    if let Some((id, footprint)) = dragged {
        let item_size = Point::new(
            footprint.width() as f32 * layout.tile_width,
            footprint.height() as f32 * layout.tile_height,
        );
        let pivot = Point::new(0.5, 0.5);
        let drag = DragSession::begin(&inventory, layout, id, item_size, pivot)
            .map_err(|e| e.to_string())?;

        let target = Point::new(
            size.width().saturating_sub(footprint.width()) as f32 * layout.tile_width + 1.0,
            size.height().saturating_sub(footprint.height()) as f32 * layout.tile_height + 1.0,
        );
        let preview = drag.hover(&inventory, target);
        info!("Hovering over {} (valid: {})", preview.cell, preview.valid);
        match drag.drop(&mut inventory, target) {
            DropOutcome::Placed(cell) => info!("Dropped helmet at {}", cell),
            DropOutcome::Reverted(previous) => info!("Helmet returned to {:?}", previous),
        }
        println!("After drag:\n{}", render_ascii(inventory.grid()));
    }

    if !inventory.sort() {
        warn!("Sort failed; layout unchanged");
    }
    println!("After sort:\n{}", render_ascii(inventory.grid()));

    let mut save_manager = SaveManager::new(config.save_directory())
        .map_err(|e| format!("Failed to create save manager: {}", e))?
        .with_autosave_interval(config.autosave_interval());
    save_manager.set_save_slot(1);
    let path = save_manager
        .save_inventory(&inventory, SaveType::Manual)
        .map_err(|e| format!("Failed to save: {}", e))?;
    println!("Saved to {}", path.display());

    Ok(())
}

/// One character per cell: `.` for free, a letter per item otherwise
fn render_ascii(grid: &GridInventory) -> String {
    let size = grid.size();
    let mut out = String::new();
    for y in 0..size.height() as i32 {
        for x in 0..size.width() as i32 {
            let c = match grid.occupant_at(grid_inventory::Cell::new(x, y)) {
                Some(id) => (b'A' + (id.0 % 26) as u8) as char,
                None => '.',
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
