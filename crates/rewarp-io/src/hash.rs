use rewarp_image::{DynImage, Image, ImageDtype, ImageVisitor};
use sha2::{Digest, Sha256};

struct ContentHash;

impl ImageVisitor for ContentHash {
    type Output = String;

    fn visit<T: ImageDtype, const C: usize>(self, image: &Image<T, C>) -> String {
        let mut hasher = Sha256::new();

        // header: width, height, channels, depth tag
        hasher.update((image.width() as u64).to_le_bytes());
        hasher.update((image.height() as u64).to_le_bytes());
        hasher.update((C as u64).to_le_bytes());
        hasher.update(T::DEPTH.as_str().as_bytes());

        let mut bytes = Vec::with_capacity(image.as_slice().len() * T::DEPTH.bytes_per_sample());
        for &v in image.as_slice() {
            v.write_le_bytes(&mut bytes);
        }
        hasher.update(&bytes);

        format!("{:x}", hasher.finalize())
    }
}

/// Hash the content of a raster.
///
/// Returns the lowercase hex SHA-256 of the size, channel count, depth tag and
/// little-endian samples, so the value does not depend on the host byte order.
///
/// # Example
///
/// ```
/// use rewarp_image::{DynImage, Image, ImageSize};
/// use rewarp_io::hash::hash_image;
///
/// let size = ImageSize { width: 4, height: 2 };
/// let a: DynImage = Image::<u8, 1>::from_size_val(size, 7).unwrap().into();
/// let b = a.clone();
///
/// assert_eq!(hash_image(&a), hash_image(&b));
/// assert_eq!(hash_image(&a).len(), 64);
/// ```
pub fn hash_image(image: &DynImage) -> String {
    image.visit(ContentHash)
}
