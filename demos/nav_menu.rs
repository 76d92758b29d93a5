//! Renders the classic multi-level navigation menu, flat and nested.

use sprig::render::NavBuilder;
use sprig::sequence::ArraySequence;
use sprig::tree::TreeNode;

fn main() -> Result<(), sprig::SequenceError> {
    // flat: the look-ahead cache marks the last item
    let flat = ArraySequence::from_pairs(vec![
        ("Home", "/home".to_string()),
        ("Products", "/products".to_string()),
        ("Company", "/company".to_string()),
        ("Privacy Policy", "/privacy-policy".to_string()),
    ]);
    println!("{}\n", NavBuilder::new("nav").flat(flat)?);

    // nested: per-depth look-ahead marks the last item of every level
    let nested = vec![
        TreeNode::leaf("Home", "/home".to_string()),
        TreeNode::branch(
            "Fake",
            "#".to_string(),
            vec![
                TreeNode::branch(
                    "Double Fake",
                    "#".to_string(),
                    vec![
                        TreeNode::leaf("Nested Double Fake", "/fake/double/nested".to_string()),
                        TreeNode::leaf("Doubly Nested Double Fake", "/fake/double/doubly".to_string()),
                    ],
                ),
                TreeNode::leaf("Triple Fake", "/fake/triple".to_string()),
            ],
        ),
        TreeNode::branch(
            "Products",
            "#".to_string(),
            vec![
                TreeNode::leaf("Product 1", "/products/1".to_string()),
                TreeNode::leaf("Product 2", "/products/2".to_string()),
                TreeNode::leaf("Product 3", "/products/3".to_string()),
                TreeNode::branch(
                    "Nested Product",
                    "#".to_string(),
                    vec![
                        TreeNode::leaf("Nested 1", "/products/nested/1".to_string()),
                        TreeNode::leaf("Nested 2", "/products/nested/2".to_string()),
                    ],
                ),
            ],
        ),
        TreeNode::leaf("Company", "/company".to_string()),
        TreeNode::leaf("Privacy Policy", "/privacy-policy".to_string()),
    ];
    println!("{}", NavBuilder::new("nav").nested(nested)?);
    Ok(())
}
