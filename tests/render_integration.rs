use std::sync::Arc;

use roast2d_animsprite::prelude::*;

const RED: [u8; 4] = [0xff, 0, 0, 0xff];
const BLUE: [u8; 4] = [0, 0, 0xff, 0xff];
const BG: [u8; 4] = [0x10, 0x10, 0x10, 0xff];

// 2 cells of 4x4, left cell red, right cell blue.
// The top-right pixel of each cell is transparent.
fn sheet() -> Image {
    let mut sheet = Image::new(UVec2::new(8, 4));
    for y in 0..4 {
        for x in 0..8 {
            sheet.set_pixel(x, y, if x < 4 { RED } else { BLUE });
        }
    }
    sheet.set_pixel(3, 0, BLANK);
    sheet.set_pixel(7, 0, BLANK);
    sheet
}

fn walking_sprite() -> AnimatedSprite {
    let mut sprite = AnimatedSprite::new(SpriteMode::Single);
    sprite.sprite_sheet = Some(Arc::new(sheet()));
    sprite.set_sprite_size(UVec2::splat(4));
    sprite
        .add_state_regions("walk", vec![IVec2::new(0, 0), IVec2::new(4, 0)])
        .unwrap();
    sprite.set_state("walk").unwrap();
    sprite
}

#[test]
fn test_walk_cycle_on_screen() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut sprite = walking_sprite();
    let mut render = Render::new(UVec2::splat(16));

    let mut seen = Vec::new();
    for _ in 0..6 {
        render.clear(BG);
        sprite.draw(0.05, Vec2::new(2.0, 2.0), &mut render).unwrap();
        seen.push(render.target().pixel(2, 2).unwrap());
        // transparent pixel keeps the background
        assert_eq!(render.target().pixel(5, 2), Some(BG));
    }
    assert_eq!(seen, vec![RED, BLUE, BLUE, RED, RED, BLUE]);
}

#[test]
fn test_flipped_and_scaled_on_screen() {
    let mut sprite = walking_sprite();
    sprite.set_sprite_scale(2.0);
    sprite.flip = FlipMode::Horizontal;
    let mut render = Render::new(UVec2::splat(32));
    render.clear(BG);
    sprite.draw(0.0, Vec2::new(10.0, 0.0), &mut render).unwrap();

    // x' = -2 * (x - 4) + 10 covers [10, 18], the transparent column 3 lands on [10, 12)
    let target = render.target();
    assert_eq!(target.pixel(10, 0), Some(BG));
    assert_eq!(target.pixel(11, 1), Some(BG));
    assert_eq!(target.pixel(10, 2), Some(RED));
    assert_eq!(target.pixel(12, 0), Some(RED));
    assert_eq!(target.pixel(17, 7), Some(RED));
    assert_eq!(target.pixel(18, 0), Some(BG));
    assert_eq!(target.pixel(12, 8), Some(BG));
}
