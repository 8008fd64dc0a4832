// 画像をモデル入力テンソルへ変換する前処理

use image::DynamicImage;
use ndarray::Array4;

/// MobileNet 系モデルの入力サイズ
pub const INPUT_SIZE: u32 = 224;

/// 中央切り抜きの比率（短辺を INPUT_SIZE / CROP_PCT にリサイズしてから切り抜く）
const CROP_PCT: f32 = 0.875;

// ImageNet の正規化定数（RGB順）
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// NCHW 形式の正規化済みテンソルを作成
pub fn to_tensor(image: &DynamicImage, size: u32) -> Array4<f32> {
    let resize_to = (size as f32 / CROP_PCT).ceil() as u32;
    let (width, height) = (image.width().max(1), image.height().max(1));

    // 短辺を resize_to に合わせてアスペクト比を保つ
    let (new_width, new_height) = if width < height {
        let scaled = (height as f32 * resize_to as f32 / width as f32).round() as u32;
        (resize_to, scaled.max(size))
    } else {
        let scaled = (width as f32 * resize_to as f32 / height as f32).round() as u32;
        (scaled.max(size), resize_to)
    };
    let resized = image.resize_exact(new_width, new_height, image::imageops::FilterType::Triangle);

    let crop_x = (new_width - size) / 2;
    let crop_y = (new_height - size) / 2;
    let rgb = resized.crop_imm(crop_x, crop_y, size, size).to_rgb8();

    let side = size as usize;
    Array4::from_shape_fn((1, 3, side, side), |(_, channel, y, x)| {
        let value = rgb.get_pixel(x as u32, y as u32)[channel] as f32 / 255.0;
        (value - MEAN[channel]) / STD[channel]
    })
}
