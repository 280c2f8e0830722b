use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Icon must not exceed 255 characters"))]
    pub icon: Option<String>,

    pub parent_id: Option<Uuid>,
}

/// Request DTO for updating a category.
///
/// `parent_id` is tri-state: absent leaves the parent unchanged, an explicit
/// `null` moves the category to the root, a value re-parents it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Icon must not exceed 255 characters"))]
    pub icon: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub parent_id: Option<Option<Uuid>>,
}

/// Distinguish an absent field (outer None) from an explicit `null`
/// (Some(None)) during deserialization.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            icon: c.icon,
            parent_id: c.parent_id,
        }
    }
}

impl From<&CategoryTreeDto> for CategoryResponseDto {
    fn from(node: &CategoryTreeDto) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            description: node.description.clone(),
            icon: node.icon.clone(),
            parent_id: node.parent_id,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build the category forest from a flat list.
    ///
    /// Children are bucketed by parent id in a single pass, then the forest
    /// is assembled from the root bucket down. Sibling order follows the
    /// input list order. Records whose parent id is absent from the snapshot
    /// are dropped, and members of a parent cycle are unreachable from any
    /// root, so a cyclic snapshot degrades to node exclusion instead of
    /// unbounded recursion.
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        let known: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();

        let mut buckets: HashMap<Option<Uuid>, Vec<Category>> = HashMap::new();
        for category in categories {
            if let Some(parent) = category.parent_id {
                // Orphan: not a root, and matches no node as a child
                if !known.contains(&parent) {
                    continue;
                }
            }
            buckets.entry(category.parent_id).or_default().push(category);
        }

        let roots = buckets.remove(&None).unwrap_or_default();
        roots
            .into_iter()
            .map(|root| Self::build_node(root, &mut buckets))
            .collect()
    }

    fn build_node(
        category: Category,
        buckets: &mut HashMap<Option<Uuid>, Vec<Category>>,
    ) -> CategoryTreeDto {
        let children = buckets
            .remove(&Some(category.id))
            .unwrap_or_default()
            .into_iter()
            .map(|child| Self::build_node(child, buckets))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name,
            description: category.description,
            icon: category.icon,
            parent_id: category.parent_id,
            children,
        }
    }

    /// Depth-first search for a node by id, children before next sibling
    pub fn find_node(tree: &[CategoryTreeDto], target_id: Uuid) -> Option<&CategoryTreeDto> {
        for node in tree {
            if node.id == target_id {
                return Some(node);
            }
            if let Some(found) = Self::find_node(&node.children, target_id) {
                return Some(found);
            }
        }
        None
    }

    /// Root-to-target ancestor chain for a category.
    ///
    /// Returns an empty path when the target is absent from the tree.
    pub fn breadcrumbs(tree: &[CategoryTreeDto], target_id: Uuid) -> Vec<CategoryResponseDto> {
        for node in tree {
            if node.id == target_id {
                return vec![node.into()];
            }
            let descendant_path = Self::breadcrumbs(&node.children, target_id);
            if !descendant_path.is_empty() {
                let mut path = Vec::with_capacity(descendant_path.len() + 1);
                path.push(node.into());
                path.extend(descendant_path);
                return path;
            }
        }
        Vec::new()
    }

    /// Total number of nodes in the forest
    pub fn node_count(tree: &[CategoryTreeDto]) -> usize {
        tree.iter()
            .map(|node| 1 + Self::node_count(&node.children))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: Uuid, name: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            icon: None,
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// The storefront's canonical fixture: two roots, one with two children.
    ///
    /// Figuras
    /// ├── Videojuegos
    /// └── Juegos de mesa
    /// Comics
    fn sample() -> (Vec<Category>, [Uuid; 4]) {
        let ids = [
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        ];
        let list = vec![
            category(ids[0], "Figuras", None),
            category(ids[1], "Videojuegos", Some(ids[0])),
            category(ids[2], "Juegos de mesa", Some(ids[0])),
            category(ids[3], "Comics", None),
        ];
        (list, ids)
    }

    #[test]
    fn builds_two_roots_with_children() {
        let (list, ids) = sample();

        let tree = CategoryTreeDto::build_tree(list);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Figuras");
        assert_eq!(tree[1].name, "Comics");
        assert!(tree[1].children.is_empty());

        let figuras = &tree[0];
        assert_eq!(figuras.children.len(), 2);
        assert_eq!(figuras.children[0].name, "Videojuegos");
        assert_eq!(figuras.children[1].name, "Juegos de mesa");
        assert_eq!(figuras.children[0].parent_id, Some(ids[0]));
    }

    #[test]
    fn node_count_matches_input_for_acyclic_list() {
        let (list, _) = sample();
        let expected = list.len();

        let tree = CategoryTreeDto::build_tree(list);

        assert_eq!(CategoryTreeDto::node_count(&tree), expected);
    }

    #[test]
    fn find_node_locates_every_record() {
        let (list, _) = sample();
        let tree = CategoryTreeDto::build_tree(list.clone());

        for record in &list {
            let node = CategoryTreeDto::find_node(&tree, record.id)
                .unwrap_or_else(|| panic!("node {} not found", record.name));
            assert_eq!(node.name, record.name);
            assert_eq!(node.parent_id, record.parent_id);
        }

        assert!(CategoryTreeDto::find_node(&tree, Uuid::new_v4()).is_none());
    }

    #[test]
    fn breadcrumbs_walk_root_to_target() {
        let (list, ids) = sample();
        let tree = CategoryTreeDto::build_tree(list);

        let path = CategoryTreeDto::breadcrumbs(&tree, ids[2]);

        assert_eq!(path.len(), 2);
        assert_eq!(path[0].name, "Figuras");
        assert_eq!(path[1].name, "Juegos de mesa");
        // First element is a root, last is the target, and consecutive
        // elements satisfy the parent relation
        assert_eq!(path[0].parent_id, None);
        assert_eq!(path[1].id, ids[2]);
        assert_eq!(path[1].parent_id, Some(path[0].id));
    }

    #[test]
    fn breadcrumbs_of_root_is_single_element() {
        let (list, ids) = sample();
        let tree = CategoryTreeDto::build_tree(list);

        let path = CategoryTreeDto::breadcrumbs(&tree, ids[3]);

        assert_eq!(path.len(), 1);
        assert_eq!(path[0].name, "Comics");
    }

    #[test]
    fn breadcrumbs_of_missing_target_is_empty() {
        let (list, _) = sample();
        let tree = CategoryTreeDto::build_tree(list);

        assert!(CategoryTreeDto::breadcrumbs(&tree, Uuid::new_v4()).is_empty());
    }

    #[test]
    fn deep_chain_breadcrumbs() {
        // a -> b -> c -> d, target d
        let ids = [
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        ];
        let list = vec![
            category(ids[0], "a", None),
            category(ids[1], "b", Some(ids[0])),
            category(ids[2], "c", Some(ids[1])),
            category(ids[3], "d", Some(ids[2])),
        ];

        let tree = CategoryTreeDto::build_tree(list);
        let path = CategoryTreeDto::breadcrumbs(&tree, ids[3]);

        let names: Vec<&str> = path.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn orphaned_record_is_excluded_entirely() {
        let (mut list, _) = sample();
        let orphan_id = Uuid::new_v4();
        list.push(category(orphan_id, "Huérfana", Some(Uuid::new_v4())));

        let tree = CategoryTreeDto::build_tree(list);

        assert_eq!(CategoryTreeDto::node_count(&tree), 4);
        assert!(CategoryTreeDto::find_node(&tree, orphan_id).is_none());
    }

    #[test]
    fn cyclic_records_are_dropped_not_recursed() {
        let (mut list, _) = sample();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        list.push(category(a, "cycle-a", Some(b)));
        list.push(category(b, "cycle-b", Some(a)));

        // Must terminate; cycle members are unreachable from any root
        let tree = CategoryTreeDto::build_tree(list);

        assert_eq!(CategoryTreeDto::node_count(&tree), 4);
        assert!(CategoryTreeDto::find_node(&tree, a).is_none());
        assert!(CategoryTreeDto::find_node(&tree, b).is_none());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let (list, _) = sample();

        let first = CategoryTreeDto::build_tree(list.clone());
        let second = CategoryTreeDto::build_tree(list);

        assert_eq!(first, second);
    }

    #[test]
    fn input_order_is_preserved_among_siblings() {
        let parent = Uuid::new_v4();
        let child_ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();

        let mut list = vec![category(parent, "root", None)];
        // Children deliberately not in any sorted order
        for (i, id) in child_ids.iter().enumerate() {
            list.push(category(*id, &format!("child-{}", 4 - i), Some(parent)));
        }

        let tree = CategoryTreeDto::build_tree(list);

        let got: Vec<Uuid> = tree[0].children.iter().map(|c| c.id).collect();
        assert_eq!(got, child_ids);
    }

    #[test]
    fn update_dto_parent_tristate() {
        let absent: UpdateCategoryDto = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(absent.parent_id, None);

        let null: UpdateCategoryDto =
            serde_json::from_str(r#"{"name":"x","parent_id":null}"#).unwrap();
        assert_eq!(null.parent_id, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateCategoryDto =
            serde_json::from_str(&format!(r#"{{"parent_id":"{}"}}"#, id)).unwrap();
        assert_eq!(set.parent_id, Some(Some(id)));
    }
}
