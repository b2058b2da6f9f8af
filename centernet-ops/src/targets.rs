//! Per-image center-point training targets.

use crate::{
    common::*, draw_gaussian, gaussian_radius, pad_max_instances, Blob, Config, HeatmapConfig,
};

/// A ground-truth box in heatmap pixels along with its class index.
#[derive(Debug, Clone, PartialEq)]
pub struct Label<T> {
    pub rect: TLBR<T>,
    pub class: usize,
}

/// The dense and per-instance targets of one image.
///
/// Per-instance arrays have exactly `max_instances` rows. Rows past the
/// number of encoded labels are zero and masked out.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterTargets<T> {
    /// `(H, W, C)` heatmap holding the elementwise maximum of all blobs.
    pub heatmap: Array3<T>,
    /// `[y, x]` integer center of each instance.
    pub indices: Array2<i64>,
    /// `[h, w]` of each instance.
    pub sizes: Array2<T>,
    /// `[dy, dx]` remainder between the exact and the integer center.
    pub offsets: Array2<T>,
    /// One for encoded instances, zero for padding.
    pub mask: Array1<T>,
}

impl<T> CenterTargets<T>
where
    T: Float,
{
    pub fn num_instances(&self) -> usize {
        self.mask.iter().filter(|&&value| value > T::zero()).count()
    }
}

/// Encodes labels into [CenterTargets].
#[derive(Debug, Clone, Getters)]
pub struct HeatmapEncoder {
    #[getset(get = "pub")]
    config: HeatmapConfig,
    #[getset(get = "pub")]
    max_instances: usize,
}

impl HeatmapEncoder {
    pub fn new(config: HeatmapConfig, max_instances: usize) -> Self {
        Self {
            config,
            max_instances,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.heatmap.clone(), config.max_instances)
    }

    /// The `(H, W, C)` heatmap shape.
    pub fn hm_shape(&self) -> [usize; 3] {
        let [height, width] = self.config.output_size;
        [height, width, self.config.num_classes.get()]
    }

    /// The integer Gaussian radius of a box, floored and clamped at zero.
    pub fn radius<T>(&self, rect: &TLBR<T>) -> i64
    where
        T: Float,
    {
        let radius = gaussian_radius(
            rect.hw(),
            cast(self.config.min_overlap.raw()),
            self.config.radius_mode,
        );
        radius.floor().to_i64().unwrap_or(0).max(0)
    }

    /// Renders the heatmap and fills the per-instance arrays.
    ///
    /// Labels whose center falls outside the heatmap or whose class has no
    /// channel are skipped. Only the first `max_instances` remaining labels
    /// are encoded.
    pub fn encode<T>(&self, labels: &[Label<T>]) -> Result<CenterTargets<T>>
    where
        T: Float + Debug,
    {
        let hm_shape = self.hm_shape();
        let [height, width, num_classes] = hm_shape;
        let scaling_factor: T = cast(self.config.scaling_factor.raw());

        let mut heatmap = Array3::zeros(hm_shape);
        let mut num_instances = 0;
        let mut indices = vec![];
        let mut sizes = vec![];
        let mut offsets = vec![];
        let inside =
            |y: i64, x: i64| (0..height as i64).contains(&y) && (0..width as i64).contains(&x);

        for label in labels {
            let Label { rect, class } = label;
            let [cy, cx, h, w] = rect.cycxhw();

            let center = cy.floor().to_i64().zip(cx.floor().to_i64());
            let (y, x) = match center {
                Some((y, x)) if inside(y, x) => (y, x),
                _ => {
                    debug!("skip label {:?} with center outside of the heatmap", label);
                    continue;
                }
            };
            if *class >= num_classes {
                debug!(
                    "skip label {:?} since the heatmap has {} classes",
                    label, num_classes
                );
                continue;
            }
            if num_instances == self.max_instances {
                debug!(
                    "drop labels beyond the limit of {} instances",
                    self.max_instances
                );
                break;
            }

            let radius = self.radius(rect);
            let blob = Blob::new(*class as i64, x, y, radius);
            let blob = draw_gaussian(hm_shape, blob, scaling_factor);
            Zip::from(&mut heatmap).and(&blob).for_each(|dst, &src| {
                if src > *dst {
                    *dst = src;
                }
            });

            indices.extend([y, x]);
            sizes.extend([h, w]);
            offsets.extend([cy - cast(y), cx - cast(x)]);
            num_instances += 1;
        }

        let max_instances = self.max_instances as i64;
        let to_slots = |values: Vec<T>| -> Result<Array2<T>> {
            let array = Array2::from_shape_vec((num_instances, 2), values)?;
            pad_max_instances(&array, max_instances, T::zero(), 0)
        };

        let indices = {
            let array = Array2::from_shape_vec((num_instances, 2), indices)?;
            pad_max_instances(&array, max_instances, 0, 0)?
        };
        let sizes = to_slots(sizes)?;
        let offsets = to_slots(offsets)?;
        let mask = pad_max_instances(
            &Array1::from_elem(num_instances, T::one()),
            max_instances,
            T::zero(),
            0,
        )?;

        Ok(CenterTargets {
            heatmap,
            indices,
            sizes,
            offsets,
            mask,
        })
    }
}
