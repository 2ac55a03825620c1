use std::path::Path;

use anyhow::Context;
use eframe::egui;
use egui_plot::{Legend, Plot, PlotPoints, Points};
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

// Fixed generation parameters for the playground's classification dataset.
const CENTERS: [[f64; 3]; 3] = [
    [0.0, 0.0, 0.0],
    [2.0, 2.0, 2.0],
    [-2.0, -2.0, -2.0],
];
const CLUSTER_STD: [f64; 3] = [0.75, 0.95, 0.85];
const N_SAMPLES: usize = 1000;
const SEED: u64 = 42;
const OUTPUT_PATH: &str = "clusters.json";

/// One sampled point and the index of the blob it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LabeledPoint {
    data: [f64; 3],
    label: u32,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Draw `n_samples` labeled points from isotropic Gaussian blobs.
///
/// Samples are split evenly across the blobs, with the remainder going to the
/// earliest ones, then shuffled so labels are interleaved in the output.
fn make_blobs(
    centers: &[[f64; 3]],
    cluster_std: &[f64],
    n_samples: usize,
    rng: &mut SimpleRng,
) -> Vec<LabeledPoint> {
    let k = centers.len();
    let mut points = Vec::with_capacity(n_samples);

    for (label, (center, &std_dev)) in centers.iter().zip(cluster_std).enumerate() {
        let mut count = n_samples / k;
        if label < n_samples % k {
            count += 1;
        }
        for _ in 0..count {
            let data = [
                rng.gauss(center[0], std_dev),
                rng.gauss(center[1], std_dev),
                rng.gauss(center[2], std_dev),
            ];
            points.push(LabeledPoint {
                data,
                label: label as u32,
            });
        }
    }

    // Fisher-Yates, driven by the same generator as the sampling.
    for i in (1..points.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        points.swap(i, j);
    }

    points
}

/// Serialize the point set as a JSON array of `{"data", "label"}` records,
/// overwriting whatever is at `path`.
fn write_dataset(points: &[LabeledPoint], path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(file, points).context("serializing dataset")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Scatter view
// ---------------------------------------------------------------------------

/// Orthographic projection: yaw about the z axis, then pitch about the x axis,
/// keeping the horizontal coordinate and the elevated depth axis.
fn project(p: &[f64; 3], yaw: f64, pitch: f64) -> [f64; 2] {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let x = p[0] * cy - p[1] * sy;
    let y = p[0] * sy + p[1] * cy;
    let z = p[2];
    [x, y * sp + z * cp]
}

/// One visually distinct colour per blob, using evenly spaced hues.
fn label_palette(n: usize) -> Vec<egui::Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n.max(1) as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            egui::Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

struct ScatterApp {
    points: Vec<LabeledPoint>,
    colors: Vec<egui::Color32>,
    yaw: f32,
    pitch: f32,
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("view_controls").show(ctx, |ui| {
            ui.horizontal(|ui: &mut egui::Ui| {
                ui.label(format!("{} points", self.points.len()));
                ui.separator();
                ui.add(egui::Slider::new(&mut self.yaw, 0.0..=std::f32::consts::TAU).text("Yaw"));
                ui.add(
                    egui::Slider::new(
                        &mut self.pitch,
                        -std::f32::consts::FRAC_PI_2..=std::f32::consts::FRAC_PI_2,
                    )
                    .text("Pitch"),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let yaw = self.yaw as f64;
            let pitch = self.pitch as f64;

            Plot::new("cluster_scatter")
                .legend(Legend::default())
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    for (label, &color) in self.colors.iter().enumerate() {
                        let projected: PlotPoints = self
                            .points
                            .iter()
                            .filter(|p| p.label as usize == label)
                            .map(|p| project(&p.data, yaw, pitch))
                            .collect();

                        plot_ui.points(
                            Points::new(projected)
                                .name(format!("cluster {label}"))
                                .color(color)
                                .radius(2.0),
                        );
                    }
                });
        });
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(SEED);
    let points = make_blobs(&CENTERS, &CLUSTER_STD, N_SAMPLES, &mut rng);

    write_dataset(&points, Path::new(OUTPUT_PATH))?;
    log::info!("Wrote {} labeled points to {OUTPUT_PATH}", points.len());

    let colors = label_palette(CENTERS.len());
    let app = ScatterApp {
        points,
        colors,
        yaw: 0.6,
        pitch: 0.4,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "3D points from three Gaussian blobs",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn generate() -> Vec<LabeledPoint> {
        let mut rng = SimpleRng::new(SEED);
        make_blobs(&CENTERS, &CLUSTER_STD, N_SAMPLES, &mut rng)
    }

    #[test]
    fn total_count_matches_configuration() {
        assert_eq!(generate().len(), N_SAMPLES);
    }

    #[test]
    fn samples_split_evenly_across_blobs() {
        let points = generate();
        let mut counts = [0usize; 3];
        for p in &points {
            assert!((p.label as usize) < CENTERS.len());
            counts[p.label as usize] += 1;
        }
        // 1000 over 3 blobs: the remainder goes to the first one.
        assert_eq!(counts, [334, 333, 333]);
    }

    #[test]
    fn points_cluster_around_their_center() {
        let points = generate();
        for (label, center) in CENTERS.iter().enumerate() {
            let cluster: Vec<&LabeledPoint> =
                points.iter().filter(|p| p.label as usize == label).collect();
            for axis in 0..3 {
                let mean: f64 =
                    cluster.iter().map(|p| p.data[axis]).sum::<f64>() / cluster.len() as f64;
                assert!(
                    (mean - center[axis]).abs() < 0.25,
                    "label {label} axis {axis}: mean {mean} vs center {}",
                    center[axis]
                );
            }
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        assert_eq!(generate(), generate());
    }

    #[test]
    fn records_serialize_as_data_and_label() {
        let points = generate();
        let value = serde_json::to_value(&points[0]).unwrap();
        let obj = value.as_object().unwrap();

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, ["data", "label"]);
        assert_eq!(obj["data"].as_array().unwrap().len(), 3);
        assert!(obj["label"].is_u64());
    }

    #[test]
    fn export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clusters.json");

        let points = generate();
        write_dataset(&points, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let reloaded: Vec<LabeledPoint> = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, points);
    }

    #[test]
    fn projection_is_identity_at_zero_angles() {
        // yaw 0, pitch 0: the screen shows the x/z plane unchanged.
        let p = [1.0, 2.0, 3.0];
        let [sx, sy] = project(&p, 0.0, 0.0);
        assert!((sx - 1.0).abs() < 1e-12);
        assert!((sy - 3.0).abs() < 1e-12);
    }
}
