//! Built-in starter content for a fresh store.
//!
//! Groups follow the usual GTD buckets; ids are fixed so that a seeded
//! store is reproducible across installs.

use super::entity::{EntityInfo, EntityResult};
use super::group::GroupEntity;
use super::item::ItemEntity;

struct SeedItem {
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    description: &'static str,
    content: &'static str,
}

struct SeedGroup {
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    image_path: &'static str,
    description: &'static str,
    items: &'static [SeedItem],
}

const SEED: &[SeedGroup] = &[
    SeedGroup {
        id: "ASAP",
        title: "ASAP",
        subtitle: "As Soon As Possible",
        image_path: "Assets/DarkGray.png",
        description: "Things which needs to be done as soon as possible.",
        items: &[SeedItem {
            id: "Work out",
            title: "Work out",
            subtitle: "",
            description: "40 pushups",
            content: "Do 40 pushups withoud breaks",
        }],
    },
    SeedGroup {
        id: "Waiting",
        title: "Waiting",
        subtitle: "Waiting for possibility to be done",
        image_path: "Assets/LightGray.png",
        description: "List of things which can not be done already. There are waiting for somebody action or some event etc.",
        items: &[SeedItem {
            id: "Pay Bills",
            title: "Pay bills",
            subtitle: "",
            description: "Pay bills for december",
            content: "Waiting for recipt.",
        }],
    },
    SeedGroup {
        id: "Calendar",
        title: "Calendar",
        subtitle: "Scheduled things",
        image_path: "Assets/MediumGray.png",
        description: "These things should be done in specified terms.",
        items: &[SeedItem {
            id: "Hairdresser",
            title: "Hairdresser",
            subtitle: "Friday, 5pm",
            description: "Go to hairdresser",
            content: "Ask for short hairs!",
        }],
    },
    SeedGroup {
        id: "Projects",
        title: "Projects",
        subtitle: "Larger affairs",
        image_path: "Assets/LightGray.png",
        description: "Category for things which require more than one action.",
        items: &[
            SeedItem {
                id: "Learn Windows 8",
                title: "Learn Windows 8",
                subtitle: "",
                description: "Watch tutorial for total beginners, create 3 store app and publish to Market.",
                content: "1. Tutorial for total beginners at Channel 9\n\n 2. dev.windows.com\n\n 3. Create development account\n\n 4. Create 3 games and publish to Market",
            },
            SeedItem {
                id: "Learn Ruby",
                title: "Learn Ruby",
                subtitle: "",
                description: "Learn Ruby language and Ruby on Rails framework for Web Development",
                content: "1. Go through Ruby basics\n\n 2. Watch Ruby on Rails tutorial from h:/tutorials/ruby\n\n 3. Create simple internet store app",
            },
        ],
    },
    SeedGroup {
        id: "FutureMaybe",
        title: "Future/Maybe",
        subtitle: "Do not know when/if to do",
        image_path: "Assets/MediumGray.png",
        description: "Things which will be done in future or not. ",
        items: &[SeedItem {
            id: "Start Blog",
            title: "Start Blog",
            subtitle: "",
            description: "Start my own technical blog.",
            content: "Use Wordpress or DotNetBlogEngine. \n\n Domain: www.awesomeblog.com \n\n Post ideas: Windows 8, Windows Phone 8, Nokia Lumia 920...",
        }],
    },
    SeedGroup {
        id: "Archive",
        title: "Archive",
        subtitle: "References",
        image_path: "Assets/DarkGray.png",
        description: "Things which not require an action. There are stored just for reference.",
        items: &[SeedItem {
            id: "Windows Phone for Absolute beginners",
            title: "Windows Phone for Absolute beginners",
            subtitle: "",
            description: "Nice tutorial.",
            content: "Created by Bob Tabor. Can be found on Channel 9.",
        }],
    },
];

/// Builds the starter groups.
pub fn seed_groups() -> EntityResult<Vec<GroupEntity>> {
    SEED.iter().map(build_group).collect()
}

fn build_group(seed: &SeedGroup) -> EntityResult<GroupEntity> {
    let info = EntityInfo::new(
        seed.id,
        seed.title,
        seed.subtitle,
        seed.image_path,
        seed.description,
    )?;
    let items = seed
        .items
        .iter()
        .map(|item| -> EntityResult<ItemEntity> {
            let info = EntityInfo::new(item.id, item.title, item.subtitle, "", item.description)?;
            Ok(ItemEntity::new(info, item.content, seed.id))
        })
        .collect::<EntityResult<Vec<_>>>()?;
    Ok(GroupEntity::with_items(info, items))
}

#[cfg(test)]
mod tests {
    use super::seed_groups;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_per_kind() {
        let groups = seed_groups().unwrap();
        let group_ids: HashSet<_> = groups.iter().map(|group| group.id()).collect();
        let item_ids: Vec<_> = groups
            .iter()
            .flat_map(|group| group.items().iter().map(|item| item.id()))
            .collect();
        let unique_item_ids: HashSet<_> = item_ids.iter().collect();

        assert_eq!(group_ids.len(), groups.len());
        assert_eq!(unique_item_ids.len(), item_ids.len());
        assert_eq!(groups.len(), 6);
        assert_eq!(item_ids.len(), 7);
    }

    #[test]
    fn seed_items_point_at_their_group() {
        for group in seed_groups().unwrap() {
            assert!(group.items().iter().all(|item| item.group_id() == group.id()));
            assert_eq!(group.top_items().as_slice(), group.items().as_slice());
        }
    }
}
