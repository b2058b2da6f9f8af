//! Square letterboxing of images along with their boxes.

use crate::{common::*, image_hw, pad_to_bounding_box, resize_bilinear};

/// Letterbox placement options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterboxOptions {
    /// Fraction of the horizontal padding placed left of the content.
    #[serde(default = "default_anchor")]
    pub xs: f64,
    /// Fraction of the vertical padding placed above the content.
    #[serde(default = "default_anchor")]
    pub ys: f64,
    /// Side length of the output. Defaults to the longer image side.
    #[serde(default)]
    pub target_dim: Option<usize>,
}

impl Default for LetterboxOptions {
    fn default() -> Self {
        Self {
            xs: default_anchor(),
            ys: default_anchor(),
            target_dim: None,
        }
    }
}

fn default_anchor() -> f64 {
    0.5
}

/// The region of the letterboxed image that holds original content, in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub top: i64,
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
}

impl Placement {
    pub fn tlbr(&self) -> [i64; 4] {
        [self.top, self.left, self.bottom, self.right]
    }
}

/// The output of [letter_box].
#[derive(Debug, Clone, Getters)]
pub struct Letterboxed<T, D, E>
where
    D: Dimension,
    E: Dimension,
{
    /// The `target_dim` x `target_dim` image.
    #[getset(get = "pub")]
    image: Array<T, D>,
    /// The boxes in the normalized coordinates of the output image.
    #[getset(get = "pub")]
    boxes: Array<T, E>,
    #[getset(get = "pub")]
    placement: Placement,
    /// Maps normalized centers and sizes from the input to the output frame.
    #[getset(get = "pub")]
    box_transform: Transform<T>,
}

impl<T, D, E> Letterboxed<T, D, E>
where
    D: Dimension,
    E: Dimension,
{
    pub fn into_parts(self) -> (Array<T, D>, Array<T, E>, Placement) {
        (self.image, self.boxes, self.placement)
    }
}

/// Pads an image to a square, resizes it to `target_dim` and remaps its boxes.
///
/// The image is `(H, W, C)` or `(N, H, W, C)`. Boxes are `[y0, x0, y1, x1]` rows
/// in normalized coordinates along the last axis of `boxes`. Boxes that end
/// up with zero height are zeroed entirely.
pub fn letter_box<T, S, D, SB, E>(
    image: &ArrayBase<S, D>,
    boxes: &ArrayBase<SB, E>,
    options: LetterboxOptions,
) -> Result<Letterboxed<T, D, E>>
where
    T: Float,
    S: Data<Elem = T>,
    SB: Data<Elem = T>,
    D: Dimension,
    E: Dimension,
{
    let LetterboxOptions { xs, ys, target_dim } = options;
    let (height, width) = image_hw(image)?;
    let clipper = height.max(width);
    ensure!(clipper > 0, "cannot letterbox an empty image");
    let target_dim = target_dim.unwrap_or(clipper);

    let pad_height_total = clipper - height;
    let pad_width_total = clipper - width;
    let pad_height = (pad_height_total as f64 * ys) as usize;
    let pad_width = (pad_width_total as f64 * xs) as usize;

    let canvas = pad_to_bounding_box(image, pad_height, pad_width, clipper, clipper)?;

    let box_transform = {
        let normalize = |len: usize| cast::<T, _>(len) / cast(clipper);
        let content = TLBR::from_tlbr_unchecked([
            normalize(pad_height),
            normalize(pad_width),
            normalize(pad_height + height),
            normalize(pad_width + width),
        ]);
        let unit = TLBR::from_tlbr_unchecked([T::zero(), T::zero(), T::one(), T::one()]);
        Transform::from_rects(&unit, &content)
    };
    let boxes = transform_boxes(boxes, &box_transform)?;

    let image = if target_dim == clipper {
        canvas
    } else {
        resize_bilinear(&canvas, target_dim, target_dim)?
    };

    let scale = target_dim as f64 / clipper as f64;
    let to_target = |len: usize| (len as f64 * scale) as i64;
    let placement = Placement {
        top: to_target(pad_height),
        left: to_target(pad_width),
        bottom: to_target(pad_height + height),
        right: to_target(pad_width + width),
    };

    trace!(
        "letterbox {}x{} image to {}x{}, placement {:?}",
        height,
        width,
        target_dim,
        target_dim,
        placement
    );

    Ok(Letterboxed {
        image,
        boxes,
        placement,
        box_transform,
    })
}

fn transform_boxes<T, S, E>(
    boxes: &ArrayBase<S, E>,
    transform: &Transform<T>,
) -> Result<Array<T, E>>
where
    T: Float,
    S: Data<Elem = T>,
    E: Dimension,
{
    let shape = boxes.shape();
    ensure!(
        shape.last() == Some(&4),
        "invalid shape: expect boxes with last dimension 4, but get {:?}",
        shape
    );
    let last_axis = Axis(shape.len() - 1);

    let mut output = boxes.to_owned();
    output.lanes_mut(last_axis).into_iter().for_each(|mut lane| {
        let tlbr = TLBR::from_tlbr_unchecked([lane[0], lane[1], lane[2], lane[3]]);
        let cycxhw = transform * &CyCxHW::from(&tlbr);
        let tlbr = if cycxhw.h() == T::zero() {
            TLBR::zeros()
        } else {
            TLBR::from(&cycxhw)
        };
        lane.iter_mut()
            .zip(tlbr.into_array())
            .for_each(|(dst, src)| *dst = src);
    });

    Ok(output)
}
