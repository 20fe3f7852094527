//! Static per-product override tables.
//!
//! Some catalog entries ship with broken or missing page content; these
//! tables substitute curated literals for exactly those products. Keys are
//! composite identities built from the catalog id and, for images, the
//! variant label. The data never mutates at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;

static IMAGE_OVERRIDES: LazyLock<HashMap<&'static str, Vec<&'static str>>> = LazyLock::new(|| {
    HashMap::from([
        (
            "435_Silver (Out of stock)",
            vec![
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3851/SILVERCELESTIALCHARMS_LOW-RES_ProductImage__83858.1628086498.jpg",
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3848/Kenya_GEORGETTE_SILVERCHARMS_LOW-RES__64492.1628084542.jpg",
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3850/Lauren_GEORGETTE_SILVERCHARMS_LOW-RES_2__21923.1628084551.jpg",
            ],
        ),
        (
            "435_Gold",
            vec![
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3849/Kenya_GEORGETTE_GOLDCHARMS_LOW-RES__76875.1628084567.jpg",
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3472/NECTAR_GEORGETTE_CHARMS_LOW-RES_02__59775.1612391349.jpg",
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3469/VOILE_CHARMS_LOW-RES_01__96084.1612391356.jpg",
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/435/3470/VOILE_CHARMS_LOW-RES_02__85621.1612391359.jpg",
            ],
        ),
        (
            "443_Powder Pink Trio (Out of stock)",
            vec![
                "https://cdn11.bigcommerce.com/s-afc70/images/stencil/1280x1280/products/443/3482/Tortoise-Shell-NAS-Glamour-Shot-Low-Res__93264.1613518076.jpg?c=2",
            ],
        ),
    ])
});

static DIRECTIONS_OVERRIDES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([(
        "335",
        "<p>To remove excess polish from skin and cuticles, dip brush in acetone and gently \
         wipe away polish from the edge of the nail. Repeat as needed on each nail.</p>",
    )])
});

/// Looks up image overrides for a product id (`{catalogId}_{variantLabel}`).
/// The returned URLs are appended after page-derived images, in table order.
pub fn image_overrides(product_id: &str) -> Option<&'static [&'static str]> {
    IMAGE_OVERRIDES.get(product_id).map(Vec::as_slice)
}

/// Looks up the DISTANT directions HTML for a catalog id. Consulted only
/// when the page has no directions node of its own.
pub fn directions_override(catalog_id: &str) -> Option<&'static str> {
    DIRECTIONS_OVERRIDES.get(catalog_id).copied()
}

/// Iterates override table keys for the CLI listing.
pub fn override_keys() -> (Vec<&'static str>, Vec<&'static str>) {
    let mut images: Vec<_> = IMAGE_OVERRIDES.keys().copied().collect();
    images.sort_unstable();
    let mut directions: Vec<_> = DIRECTIONS_OVERRIDES.keys().copied().collect();
    directions.sort_unstable();
    (images, directions)
}
