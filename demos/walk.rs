use std::{env, path::PathBuf, sync::Arc};

use roast2d_animsprite::prelude::*;

const FRAME_SIZE: u32 = 16;
const FRAMES: u32 = 4;
const TICK: f32 = 1.0 / 30.0;

// A sheet of FRAMES cells, each with a bar at a different height
fn build_sheet() -> Image {
    let mut sheet = Image::new(UVec2::new(FRAME_SIZE * FRAMES, FRAME_SIZE));
    for frame in 0..FRAMES {
        let shade = 0x30 * frame as u8;
        let color = [0x30 + shade, 0x80, 0xff - shade, 0xff];
        let top = (frame * 3) as i32;
        for y in top..top + 4 {
            for x in 0..FRAME_SIZE as i32 {
                sheet.set_pixel((frame * FRAME_SIZE) as i32 + x, y, color);
            }
        }
    }
    sheet
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("roast2d_walk"));
    std::fs::create_dir_all(&out_dir)?;

    let mut sprite = AnimatedSprite::new(SpriteMode::Single);
    sprite.sprite_sheet = Some(Arc::new(build_sheet()));
    sprite.set_sprite_size(UVec2::splat(FRAME_SIZE));
    sprite.set_sprite_scale(3.0);
    let origins = (0..FRAMES)
        .map(|i| IVec2::new((i * FRAME_SIZE) as i32, 0))
        .collect();
    sprite.add_state_regions("walk", origins)?;
    sprite.add_state_regions("idle", vec![IVec2::ZERO])?;
    sprite.set_state("idle")?;

    let mut render = Render::new(UVec2::new(160, 80));
    for i in 0..24 {
        if i == 6 {
            sprite.set_state("walk")?;
        }
        if i == 16 {
            sprite.flip = FlipMode::Horizontal;
        }
        render.clear([0x20, 0x20, 0x20, 0xff]);
        sprite.draw(TICK, Vec2::new(56.0, 16.0), &mut render)?;
        let path = out_dir.join(format!("walk_{i:02}.png"));
        render.target().save(&path)?;
        log::info!(
            "{} state {:?} frame {}",
            path.display(),
            sprite.state(),
            sprite.current_frame()
        );
    }
    Ok(())
}
