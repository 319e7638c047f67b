//! Dérivation des clés de cache

use pglsource::Variant;

/// Génère la clé de cache d'un blob d'image
///
/// La clé est dérivée de `(id, variante, dimensions cibles)` : deux requêtes
/// pour le même triplet produisent toujours la même clé, quelle que soit
/// l'instance. Le hachage SHA-1 borne la taille des clés quel que soit
/// l'identifiant fourni par la plateforme.
///
/// # Arguments
///
/// * `id` - Identifiant opaque de l'élément
/// * `variant` - Classe de requête (vignette ou image complète)
/// * `target_size` - Dimensions cibles, si le redimensionnement importe
///
/// # Exemple
///
/// ```
/// use pglcache::cache_key;
/// use pglsource::Variant;
///
/// let a = cache_key("asset-1", Variant::Thumbnail, Some((200, 200)));
/// let b = cache_key("asset-1", Variant::Thumbnail, Some((200, 200)));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 40); // 20 octets = 40 caractères hex
/// ```
pub fn cache_key(id: &str, variant: Variant, target_size: Option<(u32, u32)>) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(id.as_bytes());
    hasher.update(b"|");
    hasher.update(variant.as_str().as_bytes());
    if let Some((width, height)) = target_size {
        hasher.update(format!("|{width}x{height}").as_bytes());
    }
    hex::encode(hasher.finalize())
}
